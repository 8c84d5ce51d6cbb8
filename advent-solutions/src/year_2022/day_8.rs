//! Treetop tree house: visibility across a height map

use crate::utils::grid::{Grid, GridOrder};
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["2022"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| {
            if b.is_ascii_digit() {
                Ok(b - b'0')
            } else {
                Err(ParseError::InvalidFormat(format!(
                    "tree height '{}' is not a digit",
                    b as char
                )))
            }
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let trees: &Grid<u8> = shared;
        let mut visible = trees.same_shape(false);

        // Looking in from the left, right, top and bottom edges
        let from_left = GridOrder::new(trees.height(), trees.width());
        let from_top = from_left.column_major();
        for order in [from_left, from_left.reverse_x(), from_top, from_top.reverse_y()] {
            for line in order.lines() {
                let mut tallest: Option<u8> = None;
                for pos in line {
                    if tallest.is_none_or(|tallest| trees[pos] > tallest) {
                        visible[pos] = true;
                        tallest = Some(trees[pos]);
                    }
                }
            }
        }

        let count = visible.positions().filter(|&pos| visible[pos]).count();
        Ok(count.to_string())
    }
}

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Trees seen from `(y, x)` looking along `(dy, dx)`, including the blocking one
fn viewing_distance(trees: &Grid<u8>, (y, x): (usize, usize), (dy, dx): (isize, isize)) -> usize {
    let height = trees[(y, x)];
    let mut seen = 0;
    let (mut cy, mut cx) = (y, x);
    loop {
        let next = cy
            .checked_add_signed(dy)
            .zip(cx.checked_add_signed(dx))
            .and_then(|(ny, nx)| trees.get(ny, nx).map(|&tree| (ny, nx, tree)));
        let Some((ny, nx, tree)) = next else {
            return seen;
        };
        seen += 1;
        if tree >= height {
            return seen;
        }
        (cy, cx) = (ny, nx);
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let trees: &Grid<u8> = shared;
        let best = trees
            .positions()
            .map(|pos| {
                DIRECTIONS
                    .iter()
                    .map(|&dir| viewing_distance(trees, pos, dir))
                    .product::<usize>()
            })
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}
