//! Parsing and per-part solving traits

use crate::error::{ParseError, SolveError};

/// Turns a puzzle input into the data every part works on
pub trait AocParser {
    /// Parsed input, free to borrow from the text it came from
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// One part of a puzzle, numbered by `N`
///
/// `#[derive(AocSolver)]` requires an impl for every `N` up to `max_parts`.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A whole puzzle: parsing plus dispatch over its parts
///
/// Normally derived. Parts run in ascending order against the same shared
/// data, so part 2 sees whatever part 1 left in it.
pub trait Solver: AocParser {
    /// Parts are numbered `1..=PARTS`
    const PARTS: u8;

    /// Dispatch without range checking; prefer [`Solver::solve_checked`]
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;

    /// Run `part`, or fail with `PartOutOfRange` when it is not in `1..=PARTS`
    fn solve_checked(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        if part == 0 || part > Self::PARTS {
            return Err(SolveError::PartOutOfRange(part));
        }
        Self::solve_part(shared, part)
    }
}
