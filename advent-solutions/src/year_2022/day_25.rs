//! Full of hot air: balanced base-five fuel numbers

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 25, tags = ["2022"])]
pub struct Solver;

/// Digits from -2 to 2
const DIGITS: [char; 5] = ['=', '-', '0', '1', '2'];

fn from_snafu(text: &str) -> anyhow::Result<i64> {
    if text.is_empty() {
        bail!("empty number");
    }
    text.chars().try_fold(0i64, |acc, c| {
        let digit = DIGITS
            .iter()
            .position(|&d| d == c)
            .ok_or_else(|| anyhow!("unknown digit '{c}'"))? as i64
            - 2;
        acc.checked_mul(5)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| anyhow!("'{text}' is too large"))
    })
}

fn to_snafu(mut n: i64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while n != 0 {
        // Shift so the remainder lands on -2..=2
        let idx = (n + 2).rem_euclid(5);
        digits.push(DIGITS[idx as usize]);
        n = (n + 2).div_euclid(5);
    }
    digits.iter().rev().collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| from_snafu(line.trim()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared
            .iter()
            .try_fold(0i64, |acc, &n| acc.checked_add(n))
            .ok_or_else(|| SolveError::failed("fuel total overflows"))?;
        Ok(to_snafu(total))
    }
}

impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("Merry Christmas!".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "1=-0-2
12111
2=0=
21
2=01
111
20012
112
1=-1=
1-12
12
1=
122
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 25, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "2=-1=0");
        assert_eq!(solver.solve(2).unwrap().answer, "Merry Christmas!");
    }

    #[test]
    fn test_known_conversions() {
        let cases = [
            (1, "1"),
            (3, "1="),
            (8, "2="),
            (2022, "1=11-2"),
            (314159265, "1121-1110-1=0"),
        ];
        for (decimal, snafu) in cases {
            assert_eq!(to_snafu(decimal), snafu);
            assert_eq!(from_snafu(snafu).unwrap(), decimal);
        }
    }

    #[test]
    fn test_negative_total() {
        assert_eq!(to_snafu(-1), "-");
        assert_eq!(to_snafu(-3), "-2");
    }
}
