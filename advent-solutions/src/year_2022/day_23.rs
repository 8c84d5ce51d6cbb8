//! Unstable diffusion: elves spreading out to plant seedlings

use crate::utils::grid::Grid;
use crate::utils::vec2::Vec2;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 23, tags = ["2022"])]
pub struct Solver;

const SCORED_ROUNDS: usize = 10;
/// Elves give up if they are still shuffling after this many rounds
const ROUND_LIMIT: usize = 100_000;

/// Proposal checks in their initial order: north, south, west, east
const PROPOSALS: [(Vec2, [Vec2; 3]); 4] = [
    (Vec2::UP, [Vec2::new(-1, 1), Vec2::UP, Vec2::new(1, 1)]),
    (Vec2::DOWN, [Vec2::new(-1, -1), Vec2::DOWN, Vec2::new(1, -1)]),
    (Vec2::LEFT, [Vec2::new(-1, 1), Vec2::LEFT, Vec2::new(-1, -1)]),
    (Vec2::RIGHT, [Vec2::new(1, 1), Vec2::RIGHT, Vec2::new(1, -1)]),
];

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Vec2>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grove = Grid::parse_with(input, |b| match b {
            b'#' => Ok(true),
            b'.' => Ok(false),
            other => Err(ParseError::InvalidFormat(format!(
                "unexpected tile '{}'",
                other as char
            ))),
        })?;
        // Rows run downwards, so north is decreasing row
        Ok(grove
            .positions()
            .filter(|&pos| grove[pos])
            .map(|(y, x)| Vec2::new(x as i64, -(y as i64)))
            .collect())
    }
}

fn crowded(elves: &HashSet<Vec2>, elf: Vec2) -> bool {
    (-1..=1)
        .flat_map(|dx| (-1..=1).map(move |dy| Vec2::new(dx, dy)))
        .any(|d| d != Vec2::ZERO && elves.contains(&(elf + d)))
}

/// One round of proposals starting with `PROPOSALS[first]`; false when nobody moved
fn spread(elves: &mut HashSet<Vec2>, first: usize) -> bool {
    let current: &HashSet<Vec2> = elves;
    let mut targets: HashMap<Vec2, Vec<Vec2>> = HashMap::new();
    for &elf in current.iter().filter(|&&elf| crowded(current, elf)) {
        let proposal = (0..PROPOSALS.len())
            .map(|i| PROPOSALS[(first + i) % PROPOSALS.len()])
            .find(|(_, checks)| checks.iter().all(|&d| !current.contains(&(elf + d))));
        if let Some((step, _)) = proposal {
            targets.entry(elf + step).or_default().push(elf);
        }
    }

    let mut moved = false;
    for (target, movers) in targets {
        if let [elf] = movers[..] {
            elves.remove(&elf);
            elves.insert(target);
            moved = true;
        }
    }
    moved
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.is_empty() {
            return Ok("0".into());
        }
        let mut elves = shared.clone();
        for round in 0..SCORED_ROUNDS {
            spread(&mut elves, round);
        }
        let span = |axis: fn(&Vec2) -> i64| {
            let (lo, hi) = elves
                .iter()
                .map(axis)
                .fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            hi - lo + 1
        };
        let empty = span(|v| v.x) * span(|v| v.y) - elves.len() as i64;
        Ok(empty.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut elves = shared.clone();
        (0..ROUND_LIMIT)
            .find(|&round| !spread(&mut elves, round))
            .map(|round| (round + 1).to_string())
            .ok_or_else(|| {
                SolveError::failed(format!("elves still moving after {ROUND_LIMIT} rounds"))
            })
    }
}
