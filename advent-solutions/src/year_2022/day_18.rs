//! Boiling boulders: surface area of a lava droplet

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{bail, Context};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["2022"])]
pub struct Solver;

type Cube = [i32; 3];

const FACES: [Cube; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

fn adjacent(cube: Cube) -> impl Iterator<Item = Cube> {
    FACES
        .into_iter()
        .map(move |d| [cube[0] + d[0], cube[1] + d[1], cube[2] + d[2]])
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let cubes = parse_lines(input, |line| {
            let coords: Vec<i32> = line
                .split(',')
                .map(|c| c.trim().parse().with_context(|| format!("invalid coordinate '{c}'")))
                .collect::<anyhow::Result<_>>()?;
            let [x, y, z] = coords[..] else {
                bail!("expected 'X,Y,Z'");
            };
            Ok([x, y, z])
        })?;
        Ok(cubes.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let exposed = shared
            .iter()
            .flat_map(|&cube| adjacent(cube))
            .filter(|side| !shared.contains(side))
            .count();
        Ok(exposed.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Faces reachable by steam flooding in from one cell outside the droplet
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let droplet: &HashSet<Cube> = shared;
        let Some(first) = droplet.iter().next() else {
            return Ok("0".into());
        };
        let (mut low, mut high) = (*first, *first);
        for cube in droplet {
            for axis in 0..3 {
                low[axis] = low[axis].min(cube[axis] - 1);
                high[axis] = high[axis].max(cube[axis] + 1);
            }
        }
        let inside = |c: &Cube| (0..3).all(|axis| (low[axis]..=high[axis]).contains(&c[axis]));

        let mut steam = HashSet::from([low]);
        let mut stack = vec![low];
        let mut exterior = 0;
        while let Some(cube) = stack.pop() {
            for next in adjacent(cube).filter(|next| inside(next)) {
                if droplet.contains(&next) {
                    exterior += 1;
                } else if steam.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(exterior.to_string())
    }
}
