//! Rope bridge: knots following the head

use crate::utils::parse::parse_lines;
use crate::utils::vec2::Vec2;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["2022"])]
pub struct Solver;

impl AocParser for Solver {
    /// Head motions as `(direction, steps)`
    type SharedData<'a> = Vec<(Vec2, u32)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (direction, steps) = line
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected 'DIR STEPS', found '{line}'"))?;
            let direction = match direction {
                "U" => Vec2::UP,
                "D" => Vec2::DOWN,
                "L" => Vec2::LEFT,
                "R" => Vec2::RIGHT,
                other => return Err(anyhow!("unknown direction '{other}'")),
            };
            let steps = steps
                .trim()
                .parse()
                .with_context(|| format!("invalid step count '{steps}'"))?;
            Ok((direction, steps))
        })
    }
}

/// Number of distinct positions the last of `knots` visits
fn tail_positions(motions: &[(Vec2, u32)], knots: usize) -> usize {
    let mut rope = vec![Vec2::ZERO; knots];
    let mut visited = HashSet::from([Vec2::ZERO]);

    for &(direction, steps) in motions {
        for _ in 0..steps {
            rope[0] += direction;
            for idx in 1..rope.len() {
                let gap = rope[idx - 1] - rope[idx];
                if gap.chebyshev() <= 1 {
                    break;
                }
                rope[idx] += gap.signum();
            }
            if let Some(&tail) = rope.last() {
                visited.insert(tail);
            }
        }
    }
    visited.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 10).to_string())
    }
}
