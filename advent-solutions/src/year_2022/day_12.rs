//! Hill climbing: shortest walk up a height map

use crate::utils::grid::Grid;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::VecDeque;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["2022"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    heights: Grid<u8>,
    start: (usize, usize),
    end: (usize, usize),
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let raw = Grid::from_bytes(input)?;
        let find = |marker: u8| {
            raw.find(|&b| b == marker).ok_or_else(|| {
                ParseError::MissingData(format!("no '{}' on the map", marker as char))
            })
        };
        let (start, end) = (find(b'S')?, find(b'E')?);

        let mut heights = raw.same_shape(0u8);
        for pos in raw.positions() {
            heights[pos] = match raw[pos] {
                b'S' => 0,
                b'E' => b'z' - b'a',
                b @ b'a'..=b'z' => b - b'a',
                other => {
                    return Err(ParseError::InvalidFormat(format!(
                        "unexpected square '{}'",
                        other as char
                    )));
                }
            };
        }
        Ok(SharedData {
            heights,
            start,
            end,
        })
    }
}

/// Breadth-first search downhill from the summit until `is_goal` holds
///
/// Each step may rise any number of levels but drop by at most one, the
/// reverse of a climb.
fn steps_from_summit<F>(shared: &SharedData, is_goal: F) -> Result<usize, SolveError>
where
    F: Fn((usize, usize)) -> bool,
{
    let heights = &shared.heights;
    let mut distance = heights.same_shape(None::<usize>);
    distance[shared.end] = Some(0);
    let mut queue = VecDeque::from([shared.end]);

    while let Some(pos) = queue.pop_front() {
        let steps = distance[pos].unwrap_or_default();
        if is_goal(pos) {
            return Ok(steps);
        }
        for next in heights.neighbours(pos.0, pos.1, false) {
            if distance[next].is_none() && heights[pos] <= heights[next] + 1 {
                distance[next] = Some(steps + 1);
                queue.push_back(next);
            }
        }
    }
    Err(SolveError::failed("no route to the summit"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        steps_from_summit(shared, |pos| pos == start).map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let heights = &shared.heights;
        steps_from_summit(shared, |pos| heights[pos] == 0).map(|steps| steps.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "Sabqponm\nabcryxxl\naccszExk\nacctuvwj\nabdefghi\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 12, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "31");
        assert_eq!(solver.solve(2).unwrap().answer, "29");
    }

    #[test]
    fn test_walled_off_summit() {
        let mut solver = SolverInstance::<Solver>::new(2022, 12, "SaE\n").unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_missing_summit() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 12, "Sab\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
