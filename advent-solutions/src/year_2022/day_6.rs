//! Tuning trouble: start-of-packet markers

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let signal = input.trim();
        if signal.is_empty() {
            return Err(ParseError::MissingData("empty datastream".into()));
        }
        if let Some(bad) = signal.bytes().find(|b| !b.is_ascii_lowercase()) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character '{}'",
                bad as char
            )));
        }
        Ok(signal.as_bytes())
    }
}

/// Characters read once the last `len` of them are all distinct
fn marker_end(signal: &[u8], len: usize) -> Result<usize, SolveError> {
    signal
        .windows(len)
        .position(|window| {
            let mut seen = 0u32;
            window.iter().all(|&b| {
                let bit = 1 << (b - b'a');
                let fresh = seen & bit == 0;
                seen |= bit;
                fresh
            })
        })
        .map(|idx| idx + len)
        .ok_or_else(|| SolveError::failed(format!("no {len} distinct characters in a row")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        marker_end(shared, 4).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        marker_end(shared, 14).map(|n| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    #[test]
    fn test_examples() {
        let cases = [
            ("mjqjpqmgbljsphjdztnvjfqwrcgsmlb", "7", "19"),
            ("bvwbjplbgvbhsrlpgdmjqwftvncz", "5", "23"),
            ("nppdvjthqldpwncqszvftbrmjlhg", "6", "23"),
            ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", "10", "29"),
            ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", "11", "26"),
        ];
        for (input, packet, message) in cases {
            let mut solver = SolverInstance::<Solver>::new(2022, 6, input).unwrap();
            assert_eq!(solver.solve(1).unwrap().answer, packet, "{input}");
            assert_eq!(solver.solve(2).unwrap().answer, message, "{input}");
        }
    }

    #[test]
    fn test_no_marker() {
        let mut solver = SolverInstance::<Solver>::new(2022, 6, "aabb").unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }
}
