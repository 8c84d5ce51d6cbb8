//! Supply stacks: crane rearrangement

use crate::utils::parse::{parse_lines, sections};
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug)]
pub struct SharedData {
    /// Crates bottom to top
    stacks: Vec<Vec<u8>>,
    moves: Vec<Move>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [drawing, procedure] = sections(input)[..] else {
            return Err(ParseError::MissingData(
                "expected a crate drawing and a procedure separated by a blank line".into(),
            ));
        };
        let stacks =
            parse_drawing(drawing).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let moves = parse_lines(procedure, |line| parse_move(line, stacks.len()))?;
        Ok(SharedData { stacks, moves })
    }
}

fn parse_drawing(drawing: &str) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut rows: Vec<&[u8]> = drawing.lines().map(str::as_bytes).collect();
    let labels = rows.pop().ok_or_else(|| anyhow!("empty crate drawing"))?;
    let count = labels.split(|b| b.is_ascii_whitespace()).filter(|l| !l.is_empty()).count();

    let mut stacks = vec![Vec::new(); count];
    for row in rows.iter().rev() {
        for (idx, stack) in stacks.iter_mut().enumerate() {
            match row.get(idx * 4 + 1) {
                Some(b' ') | None => {}
                Some(&label) if label.is_ascii_uppercase() => stack.push(label),
                Some(&other) => bail!("unexpected crate '{}'", other as char),
            }
        }
    }
    Ok(stacks)
}

fn parse_move(line: &str, stacks: usize) -> anyhow::Result<Move> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let ["move", count, "from", from, "to", to] = words[..] else {
        bail!("expected 'move N from A to B'");
    };
    let stack = |label: &str| -> anyhow::Result<usize> {
        let number: usize = label.parse().with_context(|| format!("invalid stack '{label}'"))?;
        if !(1..=stacks).contains(&number) {
            bail!("stack {number} does not exist");
        }
        Ok(number - 1)
    };
    Ok(Move {
        count: count.parse().with_context(|| format!("invalid count '{count}'"))?,
        from: stack(from)?,
        to: stack(to)?,
    })
}

/// Apply every move, lifting one crate at a time or whole groups at once
fn rearrange(shared: &SharedData, keep_order: bool) -> Result<String, SolveError> {
    let mut stacks = shared.stacks.clone();
    for (idx, m) in shared.moves.iter().enumerate() {
        let height = stacks[m.from].len();
        if m.count > height {
            return Err(SolveError::failed(format!(
                "move {} lifts {} crates from a stack of {height}",
                idx + 1,
                m.count
            )));
        }
        let mut lifted = stacks[m.from].split_off(height - m.count);
        if !keep_order {
            lifted.reverse();
        }
        stacks[m.to].extend(lifted);
    }

    Ok(stacks
        .iter()
        .filter_map(|stack| stack.last().map(|&label| label as char))
        .collect())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(shared, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "    [D]    
[N] [C]    
[Z] [M] [P]
 1   2   3 

move 1 from 2 to 1
move 3 from 1 to 3
move 2 from 2 to 1
move 1 from 1 to 2
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 5, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "CMZ");
        assert_eq!(solver.solve(2).unwrap().answer, "MCD");
    }

    #[test]
    fn test_drawing_reads_bottom_up() {
        let stacks = parse_drawing("    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3").unwrap();
        assert_eq!(stacks, vec![b"ZN".to_vec(), b"MCD".to_vec(), b"P".to_vec()]);
    }

    #[test]
    fn test_move_to_missing_stack() {
        let input = "[A]\n 1 \n\nmove 1 from 1 to 2\n";
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 5, input),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_overdrawn_stack_fails() {
        let mut solver =
            SolverInstance::<Solver>::new(2022, 5, "[A]\n 1 \n\nmove 2 from 1 to 1\n").unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }
}
