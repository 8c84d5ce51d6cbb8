//! Playground junction boxes: wiring the closest pairs into circuits

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};
use itertools::Itertools;

/// Pairs joined for part 1
const CONNECTIONS: usize = 1000;
/// Pairs joined for part 1 on the small example
const EXAMPLE_CONNECTIONS: usize = 10;
/// Inputs up to this many boxes are treated as the example
const EXAMPLE_MAX_BOXES: usize = 20;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    boxes: Vec<[i64; 3]>,
    /// Index pairs, closest first
    pairs: Vec<(usize, usize)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = parse_lines(input, |line| {
            let coords: Vec<i64> = line
                .split(',')
                .map(|c| {
                    c.trim()
                        .parse()
                        .with_context(|| format!("invalid coordinate '{c}'"))
                })
                .collect::<anyhow::Result<_>>()?;
            coords.try_into().map_err(|coords: Vec<i64>| {
                anyhow!("expected 3 coordinates, found {}", coords.len())
            })
        })?;

        let pairs = (0..boxes.len())
            .tuple_combinations()
            .map(|(i, j)| (distance_squared(&boxes[i], &boxes[j]), i, j))
            .sorted_unstable()
            .map(|(_, i, j)| (i, j))
            .collect();

        Ok(SharedData { boxes, pairs })
    }
}

fn distance_squared(a: &[i64; 3], b: &[i64; 3]) -> i64 {
    a.iter().zip(b).map(|(a, b)| (a - b) * (a - b)).sum()
}

/// Union-find over box indices with circuit sizes
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Join the circuits of `a` and `b`, returning false if already joined
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    fn sizes(&mut self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.count);
        for node in 0..self.parent.len() {
            if self.find(node) == node {
                sizes.push(self.size[node]);
            }
        }
        sizes
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let connections = if shared.boxes.len() <= EXAMPLE_MAX_BOXES {
            EXAMPLE_CONNECTIONS
        } else {
            CONNECTIONS
        };

        let mut circuits = Circuits::new(shared.boxes.len());
        for &(i, j) in shared.pairs.iter().take(connections) {
            circuits.union(i, j);
        }

        let sizes = circuits.sizes();
        if sizes.len() < 3 {
            return Err(SolveError::failed(format!(
                "only {} circuits left, need 3",
                sizes.len()
            )));
        }
        let product: usize = sizes.into_iter().sorted_unstable().rev().take(3).product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circuits = Circuits::new(shared.boxes.len());
        for &(i, j) in &shared.pairs {
            if circuits.union(i, j) && circuits.count == 1 {
                return Ok((shared.boxes[i][0] * shared.boxes[j][0]).to_string());
            }
        }
        Err(SolveError::failed("boxes never form a single circuit"))
    }
}
