//! Proboscidea volcanium: opening valves against the clock

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["2022"])]
pub struct Solver;

const START: &str = "AA";
/// Working valves beyond this make the per-subset table too large
const MAX_WORKING: usize = 20;

/// Travel times between the start and every valve with a positive flow rate
#[derive(Debug, Clone)]
pub struct Network {
    /// Flow rate of each working valve
    rates: Vec<u32>,
    /// Minutes from the start to each working valve
    from_start: Vec<u32>,
    /// Minutes between working valves
    between: Vec<Vec<u32>>,
}

fn parse_valve(line: &str) -> anyhow::Result<(&str, u32, Vec<&str>)> {
    let rest = line
        .strip_prefix("Valve ")
        .ok_or_else(|| anyhow!("expected 'Valve NAME ...'"))?;
    let (name, rest) = rest
        .split_once(" has flow rate=")
        .ok_or_else(|| anyhow!("missing flow rate"))?;
    let (rate, rest) = rest.split_once(';').ok_or_else(|| anyhow!("missing tunnel list"))?;
    let rate = rate.parse().with_context(|| format!("invalid flow rate '{rate}'"))?;
    let tunnels = rest
        .trim()
        .splitn(5, ' ')
        .nth(4)
        .ok_or_else(|| anyhow!("missing tunnel list"))?
        .split(", ")
        .collect();
    Ok((name, rate, tunnels))
}

impl AocParser for Solver {
    type SharedData<'a> = Network;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let valves = parse_lines(input, parse_valve)?;
        let index: HashMap<&str, usize> =
            valves.iter().enumerate().map(|(i, (name, _, _))| (*name, i)).collect();
        let start = *index
            .get(START)
            .ok_or_else(|| ParseError::MissingData(format!("no valve {START}")))?;

        // Floyd-Warshall over every valve
        let n = valves.len();
        let unreachable = u32::MAX / 2;
        let mut dist = vec![vec![unreachable; n]; n];
        for (i, (_, _, tunnels)) in valves.iter().enumerate() {
            dist[i][i] = 0;
            for tunnel in tunnels {
                let j = *index.get(tunnel).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("tunnel to unknown valve '{tunnel}'"))
                })?;
                dist[i][j] = 1;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }

        let working: Vec<usize> = (0..n).filter(|&i| valves[i].1 > 0).collect();
        if working.len() > MAX_WORKING {
            return Err(ParseError::InvalidFormat(format!(
                "{} working valves, at most {MAX_WORKING} supported",
                working.len()
            )));
        }
        Ok(Network {
            rates: working.iter().map(|&i| valves[i].1).collect(),
            from_start: working.iter().map(|&i| dist[start][i]).collect(),
            between: working
                .iter()
                .map(|&i| working.iter().map(|&j| dist[i][j]).collect())
                .collect(),
        })
    }
}

impl Network {
    /// Best pressure released for every set of opened valves, indexed by bitmask
    fn best_by_opened(&self, minutes: u32) -> Vec<u32> {
        let mut best = vec![0; 1 << self.rates.len()];
        // (valve, minutes left, opened mask, pressure)
        let mut stack: Vec<(Option<usize>, u32, usize, u32)> = vec![(None, minutes, 0, 0)];
        while let Some((at, left, opened, pressure)) = stack.pop() {
            best[opened] = best[opened].max(pressure);
            for next in 0..self.rates.len() {
                if opened & (1 << next) != 0 {
                    continue;
                }
                let travel = match at {
                    Some(at) => self.between[at][next],
                    None => self.from_start[next],
                };
                // One extra minute to open the valve
                let Some(after) = left.checked_sub(travel + 1).filter(|&m| m > 0) else {
                    continue;
                };
                let released = pressure + after * self.rates[next];
                stack.push((Some(next), after, opened | (1 << next), released));
            }
        }
        best
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared.best_by_opened(30).into_iter().max().unwrap_or(0);
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Two workers open disjoint sets of valves
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut within = shared.best_by_opened(26);
        // Best over every subset of each mask
        for bit in 0..shared.rates.len() {
            for mask in 0..within.len() {
                if mask & (1 << bit) != 0 {
                    within[mask] = within[mask].max(within[mask ^ (1 << bit)]);
                }
            }
        }
        let all = within.len() - 1;
        let best = (0..within.len())
            .map(|mask| within[mask] + within[all ^ mask])
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}
