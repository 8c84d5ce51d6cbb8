//! Blizzard basin: crossing a valley of moving storms

use crate::utils::grid::Grid;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["2022"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Valley {
    /// Walls and blizzards as drawn at minute 0
    map: Grid<u8>,
    start: (usize, usize),
    goal: (usize, usize),
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_with(input, |b| match b {
            b'#' | b'.' | b'>' | b'<' | b'^' | b'v' => Ok(b),
            other => Err(ParseError::InvalidFormat(format!(
                "unexpected tile '{}'",
                other as char
            ))),
        })?;
        if map.height() < 3 || map.width() < 3 {
            return Err(ParseError::MissingData("valley has no interior".into()));
        }
        let gap = |y: usize| {
            (0..map.width())
                .find(|&x| map[(y, x)] == b'.')
                .map(|x| (y, x))
                .ok_or_else(|| ParseError::MissingData(format!("no opening in row {}", y + 1)))
        };
        let (start, goal) = (gap(0)?, gap(map.height() - 1)?);
        Ok(Valley { map, start, goal })
    }
}

impl Valley {
    /// Whether `(y, x)` is free of walls and blizzards at `minute`
    ///
    /// Blizzards wrap inside the walls and never enter the entry or exit rows.
    fn clear_at(&self, (y, x): (usize, usize), minute: usize) -> bool {
        let tile = self.map[(y, x)];
        if tile == b'#' {
            return false;
        }
        if y == 0 || y == self.map.height() - 1 {
            return true;
        }
        let (h, w) = (self.map.height() - 2, self.map.width() - 2);
        let (iy, ix) = (y - 1, x - 1);
        let (ty, tx) = (minute % h, minute % w);
        // Which starting cell would carry each kind of blizzard here now
        self.map[(y, (ix + w - tx) % w + 1)] != b'>'
            && self.map[(y, (ix + tx) % w + 1)] != b'<'
            && self.map[((iy + h - ty) % h + 1, x)] != b'v'
            && self.map[((iy + ty) % h + 1, x)] != b'^'
    }

    /// Minute of arrival at `to`, leaving `from` at `minute`
    fn crossing(
        &self,
        from: (usize, usize),
        to: (usize, usize),
        minute: usize,
    ) -> Result<usize, SolveError> {
        let period = lcm(self.map.height() - 2, self.map.width() - 2);
        let mut seen = HashSet::from([(from, minute % period)]);
        let mut frontier = vec![from];
        let mut minute = minute;
        while !frontier.is_empty() {
            minute += 1;
            let mut next = Vec::new();
            for pos in frontier {
                let moves = std::iter::once(pos).chain(self.map.neighbours(pos.0, pos.1, false));
                for step in moves {
                    if !self.clear_at(step, minute) || !seen.insert((step, minute % period)) {
                        continue;
                    }
                    if step == to {
                        return Ok(minute);
                    }
                    next.push(step);
                }
            }
            frontier = next;
        }
        Err(SolveError::failed("no way through the blizzards"))
    }
}

fn lcm(a: usize, b: usize) -> usize {
    let (mut x, mut y) = (a, b);
    while y != 0 {
        (x, y) = (y, x % y);
    }
    a / x * b
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.crossing(shared.start, shared.goal, 0).map(|m| m.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Out, back for the snacks, and out again
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let there = shared.crossing(shared.start, shared.goal, 0)?;
        let back = shared.crossing(shared.goal, shared.start, there)?;
        shared.crossing(shared.start, shared.goal, back).map(|m| m.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "#.######
#>>.<^<#
#.<..<<#
#>v.><>#
#<^v^^>#
######.#
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 24, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "18");
        assert_eq!(solver.solve(2).unwrap().answer, "54");
    }

    #[test]
    fn test_blizzards_wrap() {
        let valley = Solver::parse("#.###\n#>..#\n#...#\n###.#\n").unwrap();
        assert!(!valley.clear_at((1, 1), 0));
        assert!(!valley.clear_at((1, 2), 1));
        assert!(!valley.clear_at((1, 1), 3));
        assert!(valley.clear_at((1, 1), 1));
        assert!(valley.clear_at((0, 1), 0));
    }

    #[test]
    fn test_missing_exit() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 24, "#.##\n#..#\n####\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
