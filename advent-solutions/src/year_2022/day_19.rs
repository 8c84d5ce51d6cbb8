//! Not enough minerals: robot factory blueprints

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{bail, Context};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["2022"])]
pub struct Solver;

/// Index of the geode robot in `Blueprint::costs`
const GEODE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blueprint {
    id: u32,
    /// Ore, clay and obsidian needed for each robot kind, geode robot last
    costs: [[u32; 3]; 4],
}

impl Blueprint {
    /// Most of each resource any single robot needs; more robots than this are wasted
    fn spend_limit(&self) -> [u32; 3] {
        std::array::from_fn(|res| self.costs.iter().map(|cost| cost[res]).max().unwrap_or(0))
    }
}

fn parse_blueprint(line: &str) -> anyhow::Result<Blueprint> {
    let numbers: Vec<u32> = line
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().with_context(|| format!("invalid number '{s}'")))
        .collect::<anyhow::Result<_>>()?;
    let [id, ore_robot, clay_robot, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian] =
        numbers[..]
    else {
        bail!("expected 7 numbers, found {}", numbers.len());
    };
    Ok(Blueprint {
        id,
        costs: [
            [ore_robot, 0, 0],
            [clay_robot, 0, 0],
            [obsidian_ore, obsidian_clay, 0],
            [geode_ore, 0, geode_obsidian],
        ],
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_blueprint)
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    left: u32,
    robots: [u32; 3],
    stock: [u32; 3],
    geodes: u32,
}

/// Most geodes opened in `minutes`, choosing which robot to build next at each step
fn max_geodes(blueprint: &Blueprint, minutes: u32) -> u32 {
    let limit = blueprint.spend_limit();
    let mut best = 0;
    let mut stack = vec![State {
        left: minutes,
        robots: [1, 0, 0],
        stock: [0; 3],
        geodes: 0,
    }];

    while let Some(state) = stack.pop() {
        best = best.max(state.geodes);
        // Even a new geode robot every remaining minute cannot beat `best`
        let t = state.left;
        if state.geodes + t * t.saturating_sub(1) / 2 <= best {
            continue;
        }

        for (kind, cost) in blueprint.costs.iter().enumerate() {
            if kind < GEODE && state.robots[kind] >= limit[kind] {
                continue;
            }
            // Minutes of collecting before the robot is affordable
            let mut wait = 0;
            let mut possible = true;
            for res in 0..3 {
                let missing = cost[res].saturating_sub(state.stock[res]);
                if missing == 0 {
                    continue;
                }
                if state.robots[res] == 0 {
                    possible = false;
                    break;
                }
                wait = wait.max(missing.div_ceil(state.robots[res]));
            }
            if !possible || wait + 1 >= state.left {
                continue;
            }

            let elapsed = wait + 1;
            let mut next = state;
            next.left -= elapsed;
            for res in 0..3 {
                next.stock[res] = state.stock[res] + state.robots[res] * elapsed - cost[res];
            }
            if kind == GEODE {
                next.geodes += next.left;
            } else {
                next.robots[kind] += 1;
            }
            stack.push(next);
        }
    }
    best
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let quality: u32 = shared.iter().map(|bp| bp.id * max_geodes(bp, 24)).sum();
        Ok(quality.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .iter()
            .take(3)
            .map(|bp| u64::from(max_geodes(bp, 32)))
            .product();
        Ok(product.to_string())
    }
}
