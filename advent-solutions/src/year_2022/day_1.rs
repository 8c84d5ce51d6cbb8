//! Calorie counting

use crate::utils::parse::{parse_lines, sections};
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::Context;
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calories carried per elf, largest first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let totals: Vec<u64> = sections(input)
            .into_iter()
            .map(|elf| {
                parse_lines(elf, |line| {
                    line.trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid calories '{line}'"))
                })
                .map(|items| items.into_iter().sum::<u64>())
            })
            .collect::<Result<_, _>>()?;
        if totals.is_empty() {
            return Err(ParseError::MissingData("no elves".into()));
        }
        Ok(totals.into_iter().sorted_unstable_by(|a, b| b.cmp(a)).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared[0].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().take(3).sum::<u64>().to_string())
    }
}
