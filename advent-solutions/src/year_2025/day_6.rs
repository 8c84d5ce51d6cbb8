//! Cephalopod math worksheet

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Multiply,
}

impl Operation {
    fn apply(self, numbers: impl IntoIterator<Item = u64>) -> u64 {
        match self {
            Operation::Add => numbers.into_iter().sum(),
            Operation::Multiply => numbers.into_iter().product(),
        }
    }
}

/// One problem: a block of character columns between blank separator columns
#[derive(Debug)]
pub struct Problem {
    operation: Operation,
    /// Digit rows, padded with spaces to the block width
    rows: Vec<Vec<u8>>,
}

impl Problem {
    /// Numbers written left to right on each row
    fn row_numbers(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.iter().filter_map(|row| digits_to_number(row.iter().copied()))
    }

    /// Numbers written top to bottom in each character column
    fn column_numbers(&self) -> impl Iterator<Item = u64> + '_ {
        let width = self.rows.first().map_or(0, Vec::len);
        (0..width).filter_map(|x| digits_to_number(self.rows.iter().map(|row| row[x])))
    }
}

/// Character at column `x`, treating short lines as space padded
fn cell_at(line: &[u8], x: usize) -> u8 {
    line.get(x).copied().unwrap_or(b' ')
}

fn digits_to_number(chars: impl Iterator<Item = u8>) -> Option<u64> {
    chars
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&[u8]> = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::as_bytes)
            .collect();
        let Some((operators, number_lines)) = lines.split_last() else {
            return Err(ParseError::MissingData("empty worksheet".into()));
        };
        if number_lines.is_empty() {
            return Err(ParseError::MissingData("worksheet has no numbers".into()));
        }

        let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        if let Some(&bad) = lines
            .iter()
            .flat_map(|line| line.iter())
            .find(|&&c| !(c.is_ascii_digit() || matches!(c, b' ' | b'+' | b'*')))
        {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character '{}'",
                bad as char
            )));
        }

        let is_separator = |x: usize| lines.iter().all(|line| cell_at(line, x) == b' ');
        let mut problems = Vec::new();
        let mut x = 0;
        while x < width {
            if is_separator(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && !is_separator(x) {
                x += 1;
            }

            let operator = (start..x).map(|x| cell_at(operators, x)).find(|&c| c != b' ');
            let operation = match operator {
                Some(b'+') => Operation::Add,
                Some(b'*') => Operation::Multiply,
                _ => {
                    return Err(ParseError::InvalidFormat(format!(
                        "problem at column {} has no operator",
                        start + 1
                    )));
                }
            };
            let rows = number_lines
                .iter()
                .map(|line| (start..x).map(|x| cell_at(line, x)).collect())
                .collect();
            problems.push(Problem { operation, rows });
        }
        Ok(problems)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|problem| problem.operation.apply(problem.row_numbers()))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|problem| problem.operation.apply(problem.column_numbers()))
            .sum();
        Ok(total.to_string())
    }
}
