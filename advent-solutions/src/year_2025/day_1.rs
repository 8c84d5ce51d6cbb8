//! Safe dial: count how often a 100-position dial touches zero

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    zero_counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    landed: u64,
    passed: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = parse_lines(input, |line| {
            let (direction, amount) = line
                .split_at_checked(1)
                .ok_or_else(|| anyhow!("empty rotation"))?;
            let amount: i64 = amount
                .parse()
                .with_context(|| format!("invalid rotation amount '{amount}'"))?;
            match direction {
                "L" => Ok(-amount),
                "R" => Ok(amount),
                other => Err(anyhow!("rotation must start with 'L' or 'R', found '{other}'")),
            }
        })?;

        Ok(SharedData {
            rotations,
            zero_counts: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).landed.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).passed.to_string())
    }
}

fn zero_counts(shared: &mut SharedData) -> ZeroCounts {
    *shared.zero_counts.get_or_insert_with(|| {
        let mut position = DIAL_START;
        let mut counts = ZeroCounts {
            landed: 0,
            passed: 0,
        };

        for &rotation in &shared.rotations {
            counts.passed += clicks_through_zero(position, rotation);
            position = (position + rotation).rem_euclid(DIAL_SIZE);
            if position == 0 {
                counts.landed += 1;
            }
        }
        counts
    })
}

/// Number of clicks that leave the dial on zero while rotating from `position`
fn clicks_through_zero(position: i64, rotation: i64) -> u64 {
    let hits = if rotation >= 0 {
        (position + rotation) / DIAL_SIZE
    } else {
        let distance = -rotation;
        if position == 0 {
            distance / DIAL_SIZE
        } else if distance >= position {
            1 + (distance - position) / DIAL_SIZE
        } else {
            0
        }
    };
    hits as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 1, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert_eq!(solver.solve(2).unwrap().answer, "6");
    }

    #[test]
    fn test_full_turns_count_every_pass() {
        assert_eq!(clicks_through_zero(50, 1000), 10);
        assert_eq!(clicks_through_zero(50, -1000), 10);
        assert_eq!(clicks_through_zero(0, -5), 0);
        assert_eq!(clicks_through_zero(5, -5), 1);
    }

    #[test]
    fn test_rejects_unknown_direction() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2025, 1, "U10"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
