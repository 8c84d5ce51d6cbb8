//! Paper rolls: which rolls can a forklift reach

use crate::utils::grid::Grid;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

/// A roll is reachable with fewer than this many rolls around it
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| match b {
            b'@' => Ok(true),
            b'.' => Ok(false),
            other => Err(ParseError::InvalidFormat(format!(
                "unexpected cell '{}'",
                other as char
            ))),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rolls: &Grid<bool> = shared;
        let accessible = rolls
            .positions()
            .filter(|&(y, x)| rolls[(y, x)] && is_accessible(rolls, y, x))
            .count();
        Ok(accessible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut rolls = shared.clone();
        let mut stack: Vec<_> = rolls.positions().filter(|&pos| rolls[pos]).collect();
        let mut removed = 0usize;

        while let Some((y, x)) = stack.pop() {
            if !rolls[(y, x)] || !is_accessible(&rolls, y, x) {
                continue;
            }
            rolls[(y, x)] = false;
            removed += 1;
            stack.extend(rolls.neighbours(y, x, true).filter(|&pos| rolls[pos]));
        }
        Ok(removed.to_string())
    }
}

fn is_accessible(rolls: &Grid<bool>, y: usize, x: usize) -> bool {
    rolls.neighbours(y, x, true).filter(|&pos| rolls[pos]).count() < CROWDED
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 4, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "13");
        assert_eq!(solver.solve(2).unwrap().answer, "43");
    }

    #[test]
    fn test_dense_block_only_corners_accessible() {
        let mut solver = SolverInstance::<Solver>::new(2025, 4, "@@@\n@@@\n@@@\n").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "4");
        assert_eq!(solver.solve(2).unwrap().answer, "9");
    }
}
