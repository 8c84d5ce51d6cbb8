//! Movie theater: largest rectangle with red tiles in opposite corners

use crate::utils::grid::{neighbours, Grid};
use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};
use itertools::Itertools;
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025"])]
pub struct Solver;

/// Red tiles as `(x, y)`, in loop order
pub type SharedData = Vec<(i64, i64)>;

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = parse_lines(input, |line| {
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("expected 'x,y', found '{line}'"))?;
            let x: i64 = x.trim().parse().with_context(|| format!("invalid x '{x}'"))?;
            let y: i64 = y.trim().parse().with_context(|| format!("invalid y '{y}'"))?;
            Ok((x, y))
        })?;

        if tiles.is_empty() {
            return Err(ParseError::MissingData("no red tiles".into()));
        }
        for (idx, (a, b)) in tiles.iter().circular_tuple_windows().enumerate() {
            if a.0 != b.0 && a.1 != b.1 {
                return Err(ParseError::InvalidFormat(format!(
                    "red tiles {} and {} do not share a row or column",
                    idx + 1,
                    (idx + 1) % tiles.len() + 1
                )));
            }
        }
        Ok(tiles)
    }
}

fn area(a: (i64, i64), b: (i64, i64)) -> i64 {
    ((a.0 - b.0).abs() + 1) * ((a.1 - b.1).abs() + 1)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let largest = shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(1);
        Ok(largest.to_string())
    }
}

/// Coordinate compression along one axis
///
/// Every red coordinate gets a slot, a run of coordinates strictly between two
/// red ones shares a single slot, and both ends get a padding slot.
struct Axis {
    slots: HashMap<i64, usize>,
    len: usize,
}

impl Axis {
    fn new(values: impl Iterator<Item = i64>) -> Self {
        let mut slots = HashMap::new();
        let mut next = 1;
        let mut previous: Option<i64> = None;
        for value in values.sorted_unstable().dedup() {
            if previous.is_some_and(|previous| value > previous + 1) {
                next += 1;
            }
            slots.insert(value, next);
            next += 1;
            previous = Some(value);
        }
        Self {
            slots,
            len: next + 1,
        }
    }

    fn slot(&self, value: i64) -> usize {
        self.slots[&value]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Unknown,
    Border,
    Outside,
}

/// Prefix sums of compressed cells lying outside the red/green loop
struct OutsideMap {
    xs: Axis,
    ys: Axis,
    prefix: Vec<u32>,
}

impl OutsideMap {
    fn new(tiles: &[(i64, i64)]) -> Self {
        let xs = Axis::new(tiles.iter().map(|t| t.0));
        let ys = Axis::new(tiles.iter().map(|t| t.1));
        let mut map = Grid::filled(ys.len, xs.len, Tile::Unknown);

        for (a, b) in tiles.iter().circular_tuple_windows() {
            let (ya, yb) = (ys.slot(a.1), ys.slot(b.1));
            let (xa, xb) = (xs.slot(a.0), xs.slot(b.0));
            for y in ya.min(yb)..=ya.max(yb) {
                for x in xa.min(xb)..=xa.max(xb) {
                    map[(y, x)] = Tile::Border;
                }
            }
        }

        // Padding keeps the corner outside and connected to every outside cell
        let mut queue = VecDeque::from([(0, 0)]);
        map[(0, 0)] = Tile::Outside;
        while let Some((y, x)) = queue.pop_front() {
            for next in neighbours(map.height(), map.width(), y, x, false) {
                if map[next] == Tile::Unknown {
                    map[next] = Tile::Outside;
                    queue.push_back(next);
                }
            }
        }

        let width = xs.len + 1;
        let mut prefix = vec![0u32; (ys.len + 1) * width];
        for y in 0..ys.len {
            for x in 0..xs.len {
                let outside = u32::from(map[(y, x)] == Tile::Outside);
                prefix[(y + 1) * width + x + 1] = outside
                    + prefix[y * width + x + 1]
                    + prefix[(y + 1) * width + x]
                    - prefix[y * width + x];
            }
        }

        Self { xs, ys, prefix }
    }

    /// Whether the rectangle spanned by two red tiles stays inside the loop
    fn is_inside(&self, a: (i64, i64), b: (i64, i64)) -> bool {
        let (xa, xb) = (self.xs.slot(a.0), self.xs.slot(b.0));
        let (ya, yb) = (self.ys.slot(a.1), self.ys.slot(b.1));
        let (x0, x1) = (xa.min(xb), xa.max(xb) + 1);
        let (y0, y1) = (ya.min(yb), ya.max(yb) + 1);
        let width = self.xs.len + 1;
        let at = |y: usize, x: usize| self.prefix[y * width + x];
        at(y1, x1) + at(y0, x0) == at(y0, x1) + at(y1, x0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let outside = OutsideMap::new(shared);
        let largest = shared
            .iter()
            .tuple_combinations()
            .filter(|&(&a, &b)| outside.is_inside(a, b))
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(1);
        Ok(largest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 9, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "50");
        assert_eq!(solver.solve(2).unwrap().answer, "24");
    }

    #[test]
    fn test_axis_shares_gap_slots() {
        let axis = Axis::new([10, 3, 4, 10].into_iter());
        assert_eq!(axis.slot(3), 1);
        assert_eq!(axis.slot(4), 2);
        assert_eq!(axis.slot(10), 4);
        assert_eq!(axis.len, 6);
    }

    #[test]
    fn test_rejects_diagonal_step() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2025, 9, "1,1\n3,3\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
