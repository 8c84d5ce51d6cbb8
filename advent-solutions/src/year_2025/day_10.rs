//! Factory machines: fewest button presses for lights and joltage counters

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025"])]
pub struct Solver;

#[derive(Debug)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on
    lights: u64,
    /// Counter indices each button touches
    buttons: Vec<Vec<usize>>,
    joltage: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_machine)
    }
}

fn strip_delimited<'a>(token: &'a str, open: char, close: char) -> anyhow::Result<&'a str> {
    token
        .strip_prefix(open)
        .and_then(|token| token.strip_suffix(close))
        .ok_or_else(|| anyhow!("expected '{open}...{close}', found '{token}'"))
}

fn parse_list(list: &str) -> anyhow::Result<Vec<usize>> {
    list.split(',')
        .map(|n| n.trim().parse().with_context(|| format!("invalid number '{n}'")))
        .collect()
}

fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [lights, buttons @ .., joltage] = tokens.as_slice() else {
        bail!("expected lights, buttons and joltage requirements");
    };

    let lights = strip_delimited(lights, '[', ']')?;
    if lights.len() > 64 {
        bail!("{} lights do not fit in a 64 bit state", lights.len());
    }
    let light_mask = lights.bytes().enumerate().try_fold(0u64, |mask, (i, b)| match b {
        b'#' => Ok(mask | 1 << i),
        b'.' => Ok(mask),
        other => Err(anyhow!("unexpected light '{}'", other as char)),
    })?;

    let joltage: Vec<i64> = parse_list(strip_delimited(joltage, '{', '}')?)?
        .into_iter()
        .map(|j| j as i64)
        .collect();
    if joltage.len() != lights.len() {
        bail!("{} lights but {} joltage counters", lights.len(), joltage.len());
    }

    let buttons = buttons
        .iter()
        .map(|button| {
            let wiring = parse_list(strip_delimited(button, '(', ')')?)?;
            match wiring.iter().find(|&&i| i >= joltage.len()) {
                Some(i) => Err(anyhow!("button {button} wires missing light {i}")),
                None => Ok(wiring),
            }
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Machine {
        lights: light_mask,
        buttons,
        joltage,
    })
}

/// Fewest presses turning all lights off into the target pattern
fn fewest_toggles(machine: &Machine) -> Option<u64> {
    let masks: Vec<u64> = machine
        .buttons
        .iter()
        .map(|button| button.iter().fold(0u64, |mask, &i| mask | 1 << i))
        .collect();

    let mut visited = HashSet::from([0u64]);
    let mut queue = VecDeque::from([(0u64, 0u64)]);
    while let Some((state, presses)) = queue.pop_front() {
        if state == machine.lights {
            return Some(presses);
        }
        for mask in &masks {
            let next = state ^ mask;
            if visited.insert(next) {
                queue.push_back((next, presses + 1));
            }
        }
    }
    None
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// `A x = b` over non-negative integers, reduced to row echelon form with
/// every pivot column cleared from the other rows
///
/// Rows are scaled integers, so a pivot variable is
/// `(rhs - sum(coef * free)) / pivot_coef` and only exists when that division
/// is exact and non-negative.
struct PressSystem {
    /// `[coefficients..., rhs]` per pivot row
    rows: Vec<Vec<i64>>,
    /// Pivot column of each row
    pivots: Vec<usize>,
    /// Free columns with their largest useful value
    free: Vec<(usize, i64)>,
}

impl PressSystem {
    fn new(machine: &Machine) -> Option<Self> {
        let counters = machine.joltage.len();
        let buttons = machine.buttons.len();
        let mut rows: Vec<Vec<i64>> = (0..counters)
            .map(|counter| {
                machine
                    .buttons
                    .iter()
                    .map(|button| i64::from(button.contains(&counter)))
                    .chain([machine.joltage[counter]])
                    .collect()
            })
            .collect();

        let mut pivots = Vec::new();
        for col in 0..buttons {
            let rank = pivots.len();
            let Some(found) = (rank..counters).find(|&row| rows[row][col] != 0) else {
                continue;
            };
            rows.swap(rank, found);
            let pivot_row = rows[rank].clone();
            for (idx, row) in rows.iter_mut().enumerate() {
                if idx == rank || row[col] == 0 {
                    continue;
                }
                let (factor, scale) = (row[col], pivot_row[col]);
                for (value, pivot_value) in row.iter_mut().zip(&pivot_row) {
                    *value = *value * scale - pivot_value * factor;
                }
                let divisor = row.iter().copied().fold(0, gcd);
                if divisor > 1 {
                    row.iter_mut().for_each(|value| *value /= divisor);
                }
            }
            pivots.push(col);
        }

        // A zero row with a non-zero target has no solution
        if rows[pivots.len()..].iter().any(|row| row[buttons] != 0) {
            return None;
        }
        rows.truncate(pivots.len());

        let free = (0..buttons)
            .filter(|col| !pivots.contains(col))
            .map(|col| {
                let bound = machine.buttons[col]
                    .iter()
                    .map(|&counter| machine.joltage[counter])
                    .min()
                    .unwrap_or(0);
                (col, bound)
            })
            .collect();

        Some(Self { rows, pivots, free })
    }

    fn fewest_presses(&self) -> Option<i64> {
        let mut values = vec![0i64; self.pivots.len() + self.free.len()];
        let mut best = None;
        self.search(0, 0, &mut values, &mut best);
        best
    }

    fn search(&self, depth: usize, free_sum: i64, values: &mut [i64], best: &mut Option<i64>) {
        if best.is_some_and(|best| free_sum >= best) {
            return;
        }
        if let Some(&(col, bound)) = self.free.get(depth) {
            for value in 0..=bound {
                values[col] = value;
                self.search(depth + 1, free_sum + value, values, best);
            }
            values[col] = 0;
            return;
        }

        let buttons = values.len();
        let mut total = free_sum;
        for (row, &pivot) in self.rows.iter().zip(&self.pivots) {
            let rest: i64 = self
                .free
                .iter()
                .map(|&(col, _)| row[col] * values[col])
                .sum();
            let numerator = row[buttons] - rest;
            if numerator % row[pivot] != 0 {
                return;
            }
            let presses = numerator / row[pivot];
            if presses < 0 {
                return;
            }
            total += presses;
        }
        if best.is_none_or(|best| total < best) {
            *best = Some(total);
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(idx, machine)| {
                fewest_toggles(machine).ok_or_else(|| {
                    SolveError::failed(format!("machine {} lights cannot be reached", idx + 1))
                })
            })
            .sum::<Result<u64, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(idx, machine)| {
                PressSystem::new(machine)
                    .and_then(|system| system.fewest_presses())
                    .ok_or_else(|| {
                        SolveError::failed(format!(
                            "machine {} joltage cannot be reached",
                            idx + 1
                        ))
                    })
            })
            .sum::<Result<i64, _>>()
            .map(|total| total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 10, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "7");
        assert_eq!(solver.solve(2).unwrap().answer, "33");
    }

    #[test]
    fn test_example_machines_individually() {
        let machines = Solver::parse(EXAMPLE).unwrap();
        let toggles: Vec<_> = machines.iter().map(fewest_toggles).collect();
        assert_eq!(toggles, vec![Some(2), Some(3), Some(2)]);

        let presses: Vec<_> = machines
            .iter()
            .map(|m| PressSystem::new(m).and_then(|s| s.fewest_presses()))
            .collect();
        assert_eq!(presses, vec![Some(10), Some(12), Some(11)]);
    }

    #[test]
    fn test_unreachable_joltage() {
        let machines = Solver::parse("[##] (0) {1,2}").unwrap();
        assert_eq!(PressSystem::new(&machines[0]).and_then(|s| s.fewest_presses()), None);
        assert_eq!(fewest_toggles(&machines[0]), None);
    }

    #[test]
    fn test_rejects_button_for_missing_light() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2025, 10, "[#.] (0,2) {1,1}"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
