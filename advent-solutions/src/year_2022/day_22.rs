//! Monkey map: walking a board that wraps, then folds into a cube

use crate::utils::grid::Grid;
use crate::utils::parse::sections;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 22, tags = ["2022"])]
pub struct Solver;

const VOID: u8 = b' ';
const OPEN: u8 = b'.';
const WALL: u8 = b'#';

/// Facings in password order: right, down, left, up
const STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Forward(usize),
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct SharedData {
    board: Grid<u8>,
    path: Vec<Move>,
    start: (usize, usize),
}

fn parse_path(text: &str) -> Result<Vec<Move>, ParseError> {
    let mut moves = Vec::new();
    let mut tiles: Option<usize> = None;
    for c in text.trim().chars() {
        if let Some(digit) = c.to_digit(10) {
            tiles = Some(tiles.unwrap_or(0) * 10 + digit as usize);
            continue;
        }
        moves.extend(tiles.take().map(Move::Forward));
        moves.push(match c {
            'L' => Move::Left,
            'R' => Move::Right,
            other => {
                return Err(ParseError::InvalidFormat(format!("unknown turn '{other}'")));
            }
        });
    }
    moves.extend(tiles.map(Move::Forward));
    Ok(moves)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [map, path] = sections(input)[..] else {
            return Err(ParseError::MissingData(
                "expected a board and a path separated by a blank line".into(),
            ));
        };
        let rows: Vec<&str> = map.lines().collect();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut board = Grid::filled(rows.len(), width, VOID);
        for (y, row) in rows.iter().enumerate() {
            for (x, b) in row.bytes().enumerate() {
                if ![VOID, OPEN, WALL].contains(&b) {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) unexpected tile '{}'",
                        y + 1,
                        b as char
                    )));
                }
                if let Some(cell) = board.get_mut(y, x) {
                    *cell = b;
                }
            }
        }
        let start = (0..width)
            .find(|&x| board[(0, x)] == OPEN)
            .map(|x| (0, x))
            .ok_or_else(|| ParseError::MissingData("no open tile on the top row".into()))?;
        Ok(SharedData {
            board,
            path: parse_path(path)?,
            start,
        })
    }
}

/// Follow the path, with `step` deciding where each single move lands
///
/// Returns the final password.
fn walk<F>(shared: &SharedData, mut step: F) -> usize
where
    F: FnMut((usize, usize), usize) -> ((usize, usize), usize),
{
    let (mut pos, mut facing) = (shared.start, 0);
    for &m in &shared.path {
        match m {
            Move::Left => facing = (facing + 3) % 4,
            Move::Right => facing = (facing + 1) % 4,
            Move::Forward(tiles) => {
                for _ in 0..tiles {
                    let (next, next_facing) = step(pos, facing);
                    if shared.board[next] == WALL {
                        break;
                    }
                    (pos, facing) = (next, next_facing);
                }
            }
        }
    }
    1000 * (pos.0 + 1) + 4 * (pos.1 + 1) + facing
}

/// Next tile along the row or column, wrapping past the void to the far side
fn flat_step(board: &Grid<u8>, (y, x): (usize, usize), facing: usize) -> ((usize, usize), usize) {
    let (dy, dx) = STEPS[facing];
    let (h, w) = (board.height() as isize, board.width() as isize);
    let (mut ny, mut nx) = (y as isize, x as isize);
    loop {
        ny = (ny + dy).rem_euclid(h);
        nx = (nx + dx).rem_euclid(w);
        if board[(ny as usize, nx as usize)] != VOID {
            return ((ny as usize, nx as usize), facing);
        }
    }
}

type Axis = [i32; 3];

fn neg(a: Axis) -> Axis {
    a.map(|c| -c)
}

fn dot(a: Axis, b: Axis) -> i32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn combine(terms: &[(Axis, i32)]) -> Axis {
    std::array::from_fn(|i| terms.iter().map(|(axis, k)| axis[i] * k).sum())
}

/// Where one face of the net sits once folded
#[derive(Debug, Clone, Copy)]
struct Face {
    /// Face coordinates in the net, in units of the side length
    at: (usize, usize),
    /// Outward normal
    normal: Axis,
    /// Direction of increasing column
    right: Axis,
    /// Direction of increasing row
    down: Axis,
}

impl Face {
    fn facing_axis(&self, facing: usize) -> Axis {
        match facing {
            0 => self.right,
            1 => self.down,
            2 => neg(self.right),
            _ => neg(self.down),
        }
    }
}

/// The board folded into a cube of `side` tiles
///
/// Cell centres live in doubled coordinates on the surface of `[-side, side]^3`.
struct Cube {
    side: usize,
    faces: Vec<Face>,
    by_position: HashMap<(usize, usize), usize>,
}

impl Cube {
    fn fold(shared: &SharedData) -> Result<Self, SolveError> {
        let board = &shared.board;
        let tiles = board.positions().filter(|&p| board[p] != VOID).count();
        let side = (1..)
            .take_while(|s| 6 * s * s <= tiles)
            .last()
            .filter(|s| 6 * s * s == tiles)
            .ok_or_else(|| SolveError::failed(format!("{tiles} tiles do not make six square faces")))?;

        let net_h = board.height().div_ceil(side);
        let net_w = board.width().div_ceil(side);
        let is_face = |(fy, fx): (usize, usize)| board.get(fy * side, fx * side).is_some_and(|&b| b != VOID);

        let first = (shared.start.0 / side, shared.start.1 / side);
        let mut faces = vec![Face {
            at: first,
            normal: [0, 0, -1],
            right: [1, 0, 0],
            down: [0, 1, 0],
        }];
        let mut by_position = HashMap::from([(first, 0)]);
        let mut queue = VecDeque::from([0]);
        while let Some(idx) = queue.pop_front() {
            let face = faces[idx];
            let (fy, fx) = face.at;
            // Folding over an edge turns the face's normal toward the step direction
            let folds = [
                (fx + 1 < net_w).then(|| ((fy, fx + 1), face.right, neg(face.normal), face.down)),
                (fy + 1 < net_h).then(|| ((fy + 1, fx), face.down, face.right, neg(face.normal))),
                fx.checked_sub(1).map(|x| ((fy, x), neg(face.right), face.normal, face.down)),
                fy.checked_sub(1).map(|y| ((y, fx), neg(face.down), face.right, face.normal)),
            ];
            for (at, normal, right, down) in folds.into_iter().flatten() {
                if !is_face(at) || by_position.contains_key(&at) {
                    continue;
                }
                by_position.insert(at, faces.len());
                queue.push_back(faces.len());
                faces.push(Face {
                    at,
                    normal,
                    right,
                    down,
                });
            }
        }

        if faces.len() != 6 {
            return Err(SolveError::failed(format!(
                "the board folds into {} faces, not 6",
                faces.len()
            )));
        }
        Ok(Self {
            side,
            faces,
            by_position,
        })
    }

    fn step(&self, (y, x): (usize, usize), facing: usize) -> ((usize, usize), usize) {
        let s = self.side;
        let (row, col) = ((y % s) as isize, (x % s) as isize);
        let (dy, dx) = STEPS[facing];
        let (nrow, ncol) = (row + dy, col + dx);
        let inside = 0..s as isize;
        if inside.contains(&nrow) && inside.contains(&ncol) {
            return (((y as isize + dy) as usize, (x as isize + dx) as usize), facing);
        }

        let Some(face) = self.by_position.get(&(y / s, x / s)).map(|&i| self.faces[i]) else {
            return ((y, x), facing);
        };
        let heading = face.facing_axis(facing);
        let s32 = s as i32;
        let centre = combine(&[
            (face.normal, s32),
            (face.right, 2 * col as i32 + 1 - s32),
            (face.down, 2 * row as i32 + 1 - s32),
        ]);
        // One cell over the edge: onto the face ahead, one cell in from it
        let landed = combine(&[(centre, 1), (heading, 1), (face.normal, -1)]);

        let Some(next) = self.faces.iter().find(|f| f.normal == heading) else {
            return ((y, x), facing);
        };
        let ncol = ((dot(landed, next.right) + s32 - 1) / 2) as usize;
        let nrow = ((dot(landed, next.down) + s32 - 1) / 2) as usize;
        let inward = neg(face.normal);
        let next_facing = (0..4).find(|&f| next.facing_axis(f) == inward).unwrap_or(facing);
        ((next.at.0 * s + nrow, next.at.1 * s + ncol), next_facing)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let board = &shared.board;
        Ok(walk(shared, |pos, facing| flat_step(board, pos, facing)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cube = Cube::fold(shared)?;
        Ok(walk(shared, |pos, facing| cube.step(pos, facing)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "        ...#
        .#..
        #...
        ....
...#.......#
........#...
..#....#....
..........#.
        ...#....
        .....#..
        .#......
        ......#.

10R5L5R10L4R5L5
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 22, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "6032");
        assert_eq!(solver.solve(2).unwrap().answer, "5031");
    }

    #[test]
    fn test_path_tokens() {
        assert_eq!(
            parse_path("10R5L").unwrap(),
            vec![Move::Forward(10), Move::Right, Move::Forward(5), Move::Left]
        );
    }

    #[test]
    fn test_cube_edge_crossing() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        let cube = Cube::fold(&shared).unwrap();
        assert_eq!(cube.side, 4);
        // Off the right edge of the middle-right face, onto the bottom-right face heading down
        assert_eq!(cube.step((5, 11), 0), ((8, 14), 1));
        // Straight down inside one face
        assert_eq!(cube.step((0, 8), 1), ((1, 8), 1));
    }
}
