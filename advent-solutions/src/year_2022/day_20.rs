//! Grove positioning system: mixing an encrypted file

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::Context;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 20, tags = ["2022"])]
pub struct Solver;

const DECRYPTION_KEY: i64 = 811_589_153;
const GROVE_OFFSETS: [usize; 3] = [1000, 2000, 3000];

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = parse_lines(input, |line| {
            line.trim().parse::<i64>().with_context(|| format!("invalid number '{line}'"))
        })?;
        match numbers.iter().filter(|&&n| n == 0).count() {
            1 => Ok(numbers),
            zeros => Err(ParseError::InvalidFormat(format!(
                "expected exactly one 0, found {zeros}"
            ))),
        }
    }
}

/// Move every number by its value, in original order, `rounds` times
///
/// Returns the sum of the numbers at the grove offsets after the 0.
fn decrypt(numbers: &[i64], key: i64, rounds: usize) -> i64 {
    let values: Vec<i64> = numbers.iter().map(|n| n * key).collect();
    // Original indices in their current circular order
    let mut order: Vec<usize> = (0..values.len()).collect();
    let cycle = values.len() as i64 - 1;

    if cycle > 0 {
        for _ in 0..rounds {
            for (idx, &value) in values.iter().enumerate() {
                let Some(from) = order.iter().position(|&i| i == idx) else {
                    continue;
                };
                order.remove(from);
                let to = (from as i64 + value).rem_euclid(cycle) as usize;
                order.insert(to, idx);
            }
        }
    }

    let zero = values
        .iter()
        .position(|&v| v == 0)
        .and_then(|idx| order.iter().position(|&i| i == idx))
        .unwrap_or(0);
    GROVE_OFFSETS
        .iter()
        .map(|offset| values[order[(zero + offset) % order.len()]])
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(decrypt(shared, 1, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(decrypt(shared, DECRYPTION_KEY, 10).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "1\n2\n-3\n3\n-2\n0\n4\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 20, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert_eq!(solver.solve(2).unwrap().answer, "1623178306");
    }

    #[test]
    fn test_lone_zero() {
        let mut solver = SolverInstance::<Solver>::new(2022, 20, "0").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "0");
    }

    #[test]
    fn test_requires_single_zero() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 20, "1\n2\n3"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
