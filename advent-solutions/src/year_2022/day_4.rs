//! Camp cleanup: overlapping section assignments

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022"])]
pub struct Solver;

type Assignment = RangeInclusive<u32>;

fn parse_range(text: &str) -> anyhow::Result<Assignment> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("expected 'A-B', found '{text}'"))?;
    let start: u32 = start.parse().with_context(|| format!("invalid section '{start}'"))?;
    let end: u32 = end.parse().with_context(|| format!("invalid section '{end}'"))?;
    if start > end {
        bail!("range {start}-{end} runs backwards");
    }
    Ok(start..=end)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Assignment, Assignment)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (first, second) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("expected two assignments separated by ','"))?;
            Ok((parse_range(first)?, parse_range(second)?))
        })
    }
}

fn contains(outer: &Assignment, inner: &Assignment) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| a.start() <= b.end() && b.start() <= a.end())
            .count();
        Ok(count.to_string())
    }
}
