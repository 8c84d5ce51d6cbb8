//! Parsed puzzles behind a uniform, timed interface

use crate::error::{ParseError, SolveError};
use crate::solver::Solver;
use chrono::{TimeDelta, Utc};

/// Answer to one part and how long computing it took
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub duration: TimeDelta,
}

/// Run `f`, measuring wall time on the UTC clock
fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let value = f();
    (value, Utc::now() - start)
}

/// One year-day puzzle whose input has been parsed
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed_in: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input`, keeping the parse time for later reporting
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed_in) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parsed_in,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as handed out by the registry
pub trait DynSolver {
    /// Solve `part`; parts outside `1..=parts()` give `PartOutOfRange`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta;
}

impl<S: Solver> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, duration) = timed(|| S::solve_checked(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            duration,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parsed_in
    }
}
