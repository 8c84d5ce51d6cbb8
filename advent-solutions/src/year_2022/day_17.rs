//! Pyroclastic flow: falling rocks pushed by jets

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["2022"])]
pub struct Solver;

/// Rock rows bottom first, bit `c` set for column `c`, left edge at column 0
const ROCKS: [&[u8]; 5] = [
    &[0b1111],
    &[0b010, 0b111, 0b010],
    &[0b111, 0b100, 0b100],
    &[0b1, 0b1, 0b1, 0b1],
    &[0b11, 0b11],
];
const LEFT_WALL: u8 = 0b1;
const RIGHT_WALL: u8 = 0b100_0000;
const SPAWN_SHIFT: u32 = 2;
const SPAWN_GAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Jet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets = input
            .trim()
            .bytes()
            .map(|b| match b {
                b'<' => Ok(Jet::Left),
                b'>' => Ok(Jet::Right),
                other => Err(ParseError::InvalidFormat(format!(
                    "unexpected jet '{}'",
                    other as char
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if jets.is_empty() {
            return Err(ParseError::MissingData("no jet pattern".into()));
        }
        Ok(jets)
    }
}

/// The chamber with the next rock and jet to come
struct Chamber<'a> {
    jets: &'a [Jet],
    rows: Vec<u8>,
    next_jet: usize,
    next_rock: usize,
}

impl<'a> Chamber<'a> {
    fn new(jets: &'a [Jet]) -> Self {
        Self {
            jets,
            rows: Vec::new(),
            next_jet: 0,
            next_rock: 0,
        }
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn hits(&self, rock: &[u8], bottom: usize) -> bool {
        rock.iter()
            .enumerate()
            .any(|(i, row)| self.rows.get(bottom + i).is_some_and(|filled| filled & row != 0))
    }

    fn drop_rock(&mut self) {
        let mut rock: Vec<u8> = ROCKS[self.next_rock].iter().map(|row| row << SPAWN_SHIFT).collect();
        self.next_rock = (self.next_rock + 1) % ROCKS.len();
        let mut bottom = self.height() + SPAWN_GAP;

        loop {
            let jet = self.jets[self.next_jet];
            self.next_jet = (self.next_jet + 1) % self.jets.len();
            let pushed: Option<Vec<u8>> = match jet {
                Jet::Left if rock.iter().all(|row| row & LEFT_WALL == 0) => {
                    Some(rock.iter().map(|row| row >> 1).collect())
                }
                Jet::Right if rock.iter().all(|row| row & RIGHT_WALL == 0) => {
                    Some(rock.iter().map(|row| row << 1).collect())
                }
                _ => None,
            };
            if let Some(pushed) = pushed.filter(|pushed| !self.hits(pushed, bottom)) {
                rock = pushed;
            }
            if bottom == 0 || self.hits(&rock, bottom - 1) {
                break;
            }
            bottom -= 1;
        }

        for (i, row) in rock.into_iter().enumerate() {
            if self.rows.len() <= bottom + i {
                self.rows.resize(bottom + i + 1, 0);
            }
            self.rows[bottom + i] |= row;
        }
    }

    /// Depth of the top filled cell in each column, `None` while a column is empty
    fn skyline(&self) -> [Option<usize>; 7] {
        std::array::from_fn(|col| {
            self.rows
                .iter()
                .rev()
                .position(|row| row & (1 << col) != 0)
        })
    }
}

/// Tower height after `rocks` rocks have settled
///
/// Once the rock shape, jet position and skyline repeat, the tower grows by
/// the same amount every cycle, so whole cycles are skipped arithmetically.
fn tower_height(jets: &[Jet], rocks: u64) -> u64 {
    let mut chamber = Chamber::new(jets);
    let mut seen: HashMap<(usize, usize, [Option<usize>; 7]), (u64, u64)> = HashMap::new();
    let mut skipped = 0;
    let mut dropped = 0;

    while dropped < rocks {
        chamber.drop_rock();
        dropped += 1;
        if skipped > 0 {
            continue;
        }
        let key = (chamber.next_rock, chamber.next_jet, chamber.skyline());
        let height = chamber.height() as u64;
        if let Some((then_dropped, then_height)) = seen.insert(key, (dropped, height)) {
            let period = dropped - then_dropped;
            let cycles = (rocks - dropped) / period;
            skipped = cycles * (height - then_height);
            dropped += cycles * period;
        }
    }
    chamber.height() as u64 + skipped
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 17, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3068");
        assert_eq!(solver.solve(2).unwrap().answer, "1514285714288");
    }

    #[test]
    fn test_first_rocks_match_simulation() {
        let jets = Solver::parse(EXAMPLE).unwrap();
        let mut chamber = Chamber::new(&jets);
        chamber.drop_rock();
        assert_eq!(chamber.rows, vec![0b0111100]);
        chamber.drop_rock();
        assert_eq!(chamber.height(), 4);
        // Small counts finish before any cycle is found
        assert_eq!(tower_height(&jets, 2), 4);
    }

    #[test]
    fn test_unknown_jet() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 17, "<>x"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
