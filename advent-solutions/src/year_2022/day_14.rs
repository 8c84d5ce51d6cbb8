//! Regolith reservoir: falling sand

use crate::utils::grid::Grid;
use crate::utils::parse::parse_lines;
use crate::utils::vec2::Vec2;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["2022"])]
pub struct Solver;

const SOURCE_X: i64 = 500;

/// Cave slice around the sand source; `y` grows downwards
#[derive(Debug, Clone)]
pub struct Cave {
    /// Rock cells, one row past the lowest rock
    rock: Grid<bool>,
    /// Cave x of grid column 0
    left: i64,
    lowest: usize,
}

fn parse_path(line: &str) -> anyhow::Result<Vec<Vec2>> {
    line.split(" -> ")
        .map(|point| {
            let (x, y) = point
                .split_once(',')
                .ok_or_else(|| anyhow!("expected 'X,Y', found '{point}'"))?;
            let x = x.trim().parse().with_context(|| format!("invalid x '{x}'"))?;
            let y: i64 = y.trim().parse().with_context(|| format!("invalid y '{y}'"))?;
            if y < 0 {
                bail!("rock above the source at y={y}");
            }
            Ok(Vec2::new(x, y))
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let paths = parse_lines(input, parse_path)?;
        let lowest = paths
            .iter()
            .flatten()
            .map(|p| p.y)
            .max()
            .ok_or_else(|| ParseError::MissingData("no rock paths".into()))?;

        // Sand spreads at most one column per row, so the floor two rows
        // below the lowest rock bounds the columns it can reach
        let reach = lowest + 2;
        let left = SOURCE_X - reach;
        let mut rock = Grid::filled(reach as usize, (2 * reach + 1) as usize, false);
        for path in &paths {
            for segment in path.windows(2) {
                let (from, to) = (segment[0], segment[1]);
                if from.x != to.x && from.y != to.y {
                    return Err(ParseError::InvalidFormat(format!(
                        "diagonal rock from {},{} to {},{}",
                        from.x, from.y, to.x, to.y
                    )));
                }
                let step = (to - from).signum();
                let mut at = from;
                loop {
                    // Rock outside the reachable triangle never touches sand
                    let col = usize::try_from(at.x - left).ok();
                    if let Some(cell) = col.and_then(|col| rock.get_mut(at.y as usize, col)) {
                        *cell = true;
                    }
                    if at == to {
                        break;
                    }
                    at += step;
                }
            }
        }
        Ok(Cave {
            rock,
            left,
            lowest: lowest as usize,
        })
    }
}

/// Grains that come to rest before one falls into the void, or with a floor
/// before the source itself is buried
fn pour(cave: &Cave, floor: bool) -> usize {
    let mut filled = cave.rock.clone();
    let source = (0, (SOURCE_X - cave.left) as usize);
    // Grains below `lowest` fall forever unless the floor catches them
    let bottom = if floor { filled.height() - 1 } else { cave.lowest };
    let mut grains = 0;

    // Each grain follows the previous grain's path until it diverges
    let mut path = vec![source];
    while let Some(&(y, x)) = path.last() {
        if y == bottom {
            if !floor {
                break;
            }
            filled[(y, x)] = true;
            grains += 1;
            path.pop();
            continue;
        }
        let next = [x, x.wrapping_sub(1), x + 1]
            .into_iter()
            .find(|&nx| filled.get(y + 1, nx) == Some(&false));
        match next {
            Some(nx) => path.push((y + 1, nx)),
            None => {
                filled[(y, x)] = true;
                grains += 1;
                path.pop();
            }
        }
    }
    grains
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(pour(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(pour(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "498,4 -> 498,6 -> 496,6\n503,4 -> 502,4 -> 502,9 -> 494,9\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 14, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "24");
        assert_eq!(solver.solve(2).unwrap().answer, "93");
    }

    #[test]
    fn test_rock_paths_are_drawn() {
        let cave = Solver::parse(EXAMPLE).unwrap();
        let at = |x: i64, y: usize| cave.rock[(y, (x - cave.left) as usize)];
        assert!(at(498, 5));
        assert!(at(497, 6));
        assert!(at(494, 9));
        assert!(!at(500, 8));
        assert_eq!(cave.lowest, 9);
    }

    #[test]
    fn test_diagonal_path_rejected() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 14, "498,4 -> 500,6"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
