//! Battery banks: largest joltage from picking digits in order

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            line.bytes()
                .map(|b| match b {
                    b'0'..=b'9' => Ok(b - b'0'),
                    _ => Err(anyhow!("battery '{}' is not a digit", b as char)),
                })
                .collect()
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2).map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12).map(|total| total.to_string())
    }
}

fn total_joltage(banks: &[Vec<u8>], batteries: usize) -> Result<u64, SolveError> {
    banks
        .iter()
        .map(|bank| {
            max_joltage(bank, batteries).ok_or_else(|| {
                SolveError::failed(format!(
                    "bank of {} batteries cannot turn on {batteries}",
                    bank.len()
                ))
            })
        })
        .sum()
}

/// Largest number formed by `batteries` digits of `bank`, keeping their order
///
/// Each digit is the largest one that still leaves enough digits behind it
/// (earliest on ties).
fn max_joltage(bank: &[u8], batteries: usize) -> Option<u64> {
    if bank.len() < batteries {
        return None;
    }

    let mut joltage = 0u64;
    let mut start = 0;
    for remaining in (0..batteries).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, &digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, digit)| *digit)?;
        joltage = joltage * 10 + u64::from(digit);
        start += offset + 1;
    }
    Some(joltage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 3, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "357");
        assert_eq!(solver.solve(2).unwrap().answer, "3121910778619");
    }

    #[test]
    fn test_max_joltage_keeps_order() {
        assert_eq!(max_joltage(&[8, 1, 8, 1, 9], 2), Some(89));
        assert_eq!(max_joltage(&[1, 9], 2), Some(19));
        assert_eq!(max_joltage(&[1], 2), None);
    }

    #[test]
    fn test_short_bank_fails_to_solve() {
        let mut solver = SolverInstance::<Solver>::new(2025, 3, "12345").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "45");
        assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
    }
}
