//! Rock paper scissors strategy guide

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022"])]
pub struct Solver;

/// One round as `(opponent, column)`, both in `0..3`
///
/// Shapes are numbered rock, paper, scissors, so shape `s + 1` (mod 3) beats
/// shape `s`.
pub type Round = (u8, u8);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| match line.as_bytes() {
            [opponent @ b'A'..=b'C', b' ', column @ b'X'..=b'Z'] => {
                Ok((opponent - b'A', column - b'X'))
            }
            _ => Err(anyhow!("expected '[ABC] [XYZ]', found '{line}'")),
        })
    }
}

fn score(opponent: u8, mine: u8) -> u64 {
    // 0 lose, 1 draw, 2 win
    let outcome = (mine + 4 - opponent) % 3;
    u64::from(mine + 1) + u64::from(outcome) * 3
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|&(opponent, mine)| score(opponent, mine)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|&(opponent, outcome)| score(opponent, (opponent + outcome + 2) % 3))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 2, "A Y\nB X\nC Z\n").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "15");
        assert_eq!(solver.solve(2).unwrap().answer, "12");
    }

    #[test]
    fn test_score_table() {
        // rock vs paper wins, paper vs paper draws, scissors vs paper loses
        assert_eq!(score(0, 1), 8);
        assert_eq!(score(1, 1), 5);
        assert_eq!(score(2, 1), 2);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 2, "D X"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
