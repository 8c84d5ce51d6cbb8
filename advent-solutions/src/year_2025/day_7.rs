//! Tachyon manifold: a beam falling through splitters

use crate::utils::dp_cache::{DpCache, DpProblem};
use crate::utils::grid::Grid;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Splitter,
}

#[derive(Debug)]
pub struct SharedData {
    manifold: Grid<Cell>,
    start: (usize, usize),
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut start = None;
        let mut cell_idx = 0usize;
        let manifold = Grid::parse_with(input, |b| {
            let cell = match b {
                b'.' => Ok(Cell::Empty),
                b'^' => Ok(Cell::Splitter),
                b'S' if start.is_none() => {
                    start = Some(cell_idx);
                    Ok(Cell::Empty)
                }
                b'S' => Err(ParseError::InvalidFormat("more than one start".into())),
                other => Err(ParseError::InvalidFormat(format!(
                    "unexpected cell '{}'",
                    other as char
                ))),
            };
            cell_idx += 1;
            cell
        })?;

        let start = start
            .map(|idx| (idx / manifold.width(), idx % manifold.width()))
            .ok_or_else(|| ParseError::MissingData("no start 'S' in manifold".into()))?;
        Ok(SharedData { manifold, start })
    }
}

/// Cells a beam at `(y, x)` moves to next
///
/// A splitter sends the beam sideways on the same row; beams leaving through
/// the sides are lost. Nothing follows the bottom row.
fn next_cells(manifold: &Grid<Cell>, (y, x): (usize, usize)) -> Vec<(usize, usize)> {
    if y + 1 >= manifold.height() {
        return Vec::new();
    }
    match manifold[(y, x)] {
        Cell::Empty => vec![(y + 1, x)],
        Cell::Splitter => [x.checked_sub(1), x.checked_add(1)]
            .into_iter()
            .flatten()
            .filter(|&x| x < manifold.width())
            .map(|x| (y, x))
            .collect(),
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let manifold = &shared.manifold;
        let mut visited = HashSet::from([shared.start]);
        let mut stack = vec![shared.start];
        let mut splitters_hit = 0usize;

        while let Some(pos) = stack.pop() {
            if manifold[pos] == Cell::Splitter && pos.0 + 1 < manifold.height() {
                splitters_hit += 1;
            }
            for next in next_cells(manifold, pos) {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(splitters_hit.to_string())
    }
}

/// Number of timelines a beam entering `(y, x)` ends up in
struct Timelines<'a> {
    manifold: &'a Grid<Cell>,
}

impl DpProblem for Timelines<'_> {
    type State = (usize, usize);
    type Value = u64;

    fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
        next_cells(self.manifold, *pos)
    }

    fn combine(&self, pos: &(usize, usize), deps: &[u64]) -> u64 {
        if pos.0 + 1 >= self.manifold.height() {
            1
        } else {
            deps.iter().sum()
        }
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cache = DpCache::new(Timelines {
            manifold: &shared.manifold,
        });
        cache
            .get(&shared.start)
            .map(|timelines| timelines.to_string())
            .ok_or_else(|| SolveError::failed("beam path loops"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "\
.......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 7, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "21");
        assert_eq!(solver.solve(2).unwrap().answer, "40");
    }

    #[test]
    fn test_single_splitter() {
        let mut solver = SolverInstance::<Solver>::new(2025, 7, ".S.\n.^.\n...\n").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "1");
        assert_eq!(solver.solve(2).unwrap().answer, "2");
    }

    #[test]
    fn test_missing_start() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2025, 7, "...\n.^.\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
