//! Reactor wiring: counting paths through a device graph

use crate::utils::dp_cache::{DpCache, DpProblem};
use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use std::collections::HashMap;

const OUT: &str = "out";
const DAC_SEEN: u8 = 0b01;
const FFT_SEEN: u8 = 0b10;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["2025"])]
pub struct Solver;

/// Device graph with names interned to indices
#[derive(Debug)]
pub struct Devices<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Devices<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        let next = self.ids.len();
        let id = *self.ids.entry(name).or_insert(next);
        if id == next {
            self.outputs.push(Vec::new());
        }
        id
    }

    fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Devices<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines = parse_lines(input, |line| {
            let (device, outputs) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected 'device: outputs...', found '{line}'"))?;
            Ok((device.trim(), outputs))
        })?;

        let mut devices = Devices {
            ids: HashMap::new(),
            outputs: Vec::new(),
        };
        for (device, outputs) in lines {
            let from = devices.intern(device);
            for output in outputs.split_whitespace() {
                let to = devices.intern(output);
                devices.outputs[from].push(to);
            }
        }
        Ok(devices)
    }
}

/// Paths from a state to `out`, where the state remembers which of the
/// checkpoint devices were already passed
struct PathCount<'d> {
    outputs: &'d [Vec<usize>],
    out: usize,
    checkpoints: [(Option<usize>, u8); 2],
    required: u8,
}

impl PathCount<'_> {
    fn seen_at(&self, device: usize) -> u8 {
        self.checkpoints
            .iter()
            .filter(|(id, _)| *id == Some(device))
            .fold(0, |seen, (_, flag)| seen | flag)
    }

    fn start(&self, device: usize) -> (usize, u8) {
        (device, self.seen_at(device))
    }
}

impl DpProblem for PathCount<'_> {
    type State = (usize, u8);
    type Value = u64;

    fn deps(&self, &(device, seen): &(usize, u8)) -> Vec<(usize, u8)> {
        if device == self.out {
            return Vec::new();
        }
        self.outputs[device]
            .iter()
            .map(|&next| (next, seen | self.seen_at(next)))
            .collect()
    }

    fn combine(&self, &(device, seen): &(usize, u8), deps: &[u64]) -> u64 {
        if device == self.out {
            u64::from(seen & self.required == self.required)
        } else {
            deps.iter().sum()
        }
    }
}

fn count_paths(devices: &Devices, from: &str, required: u8) -> Result<u64, SolveError> {
    let start = devices
        .id(from)
        .ok_or_else(|| SolveError::failed(format!("no device named '{from}'")))?;
    let out = devices
        .id(OUT)
        .ok_or_else(|| SolveError::failed(format!("no device named '{OUT}'")))?;

    let problem = PathCount {
        outputs: &devices.outputs,
        out,
        checkpoints: [(devices.id("dac"), DAC_SEEN), (devices.id("fft"), FFT_SEEN)],
        required,
    };
    let start = problem.start(start);
    DpCache::new(problem)
        .get(&start)
        .ok_or_else(|| SolveError::failed(format!("wiring loops back on a path from '{from}'")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_paths(shared, "you", 0).map(|paths| paths.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_paths(shared, "svr", DAC_SEEN | FFT_SEEN).map(|paths| paths.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE_YOU: &str = "\
aaa: you hhh
you: bbb ccc
bbb: ddd eee
ccc: ddd eee fff
ddd: ggg
eee: out
fff: out
ggg: out
hhh: ccc fff iii
iii: out
";

    const EXAMPLE_SVR: &str = "\
svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out
";

    #[test]
    fn test_example_part_1() {
        let mut solver = SolverInstance::<Solver>::new(2025, 11, EXAMPLE_YOU).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "5");
    }

    #[test]
    fn test_example_part_2() {
        let mut solver = SolverInstance::<Solver>::new(2025, 11, EXAMPLE_SVR).unwrap();
        assert_eq!(solver.solve(2).unwrap().answer, "2");
    }

    #[test]
    fn test_missing_start_device() {
        let mut solver = SolverInstance::<Solver>::new(2025, 11, EXAMPLE_SVR).unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_loop_in_wiring_fails() {
        let input = "you: aaa\naaa: bbb out\nbbb: aaa\n";
        let mut solver = SolverInstance::<Solver>::new(2025, 11, input).unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }
}
