//! No space left on device: directory sizes from a terminal session

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022"])]
pub struct Solver;

const DISK_SIZE: u64 = 70_000_000;
const UPDATE_SIZE: u64 = 30_000_000;
const SMALL_DIR: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Cd(&'a str),
    Ls,
    Dir,
    File(&'a str, u64),
}

fn parse_line(line: &str) -> anyhow::Result<Line<'_>> {
    if let Some(command) = line.strip_prefix("$ ") {
        return match command.split_once(' ') {
            Some(("cd", target)) => Ok(Line::Cd(target)),
            None if command == "ls" => Ok(Line::Ls),
            _ => Err(anyhow!("unknown command '{command}'")),
        };
    }
    match line.split_once(' ') {
        Some(("dir", _)) => Ok(Line::Dir),
        Some((size, name)) => {
            let size = size.parse().with_context(|| format!("invalid file size '{size}'"))?;
            Ok(Line::File(name, size))
        }
        None => bail!("expected 'dir NAME' or 'SIZE NAME'"),
    }
}

impl AocParser for Solver {
    /// Total size of every directory seen, root first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let session = parse_lines(input, parse_line)?;

        let mut cwd: Vec<&str> = Vec::new();
        let mut sizes: HashMap<Vec<&str>, u64> = HashMap::from([(Vec::new(), 0)]);
        let mut files: HashSet<(Vec<&str>, &str)> = HashSet::new();
        for line in session {
            match line {
                Line::Cd("/") => cwd.clear(),
                Line::Cd("..") => {
                    if cwd.pop().is_none() {
                        return Err(ParseError::InvalidFormat("'cd ..' above the root".into()));
                    }
                }
                Line::Cd(name) => {
                    cwd.push(name);
                    sizes.entry(cwd.clone()).or_insert(0);
                }
                Line::Ls | Line::Dir => {}
                Line::File(name, size) => {
                    // A directory listed twice must not count its files twice
                    if !files.insert((cwd.clone(), name)) {
                        continue;
                    }
                    for depth in 0..=cwd.len() {
                        *sizes.entry(cwd[..depth].to_vec()).or_insert(0) += size;
                    }
                }
            }
        }

        let root = sizes.remove(&Vec::new()).unwrap_or_default();
        let mut totals = vec![root];
        totals.extend(sizes.into_values());
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().filter(|&&size| size <= SMALL_DIR).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used = shared.first().copied().unwrap_or_default();
        let free = DISK_SIZE.saturating_sub(used);
        let needed = UPDATE_SIZE.saturating_sub(free);
        shared
            .iter()
            .filter(|&&size| size >= needed)
            .min()
            .map(|size| size.to_string())
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))
    }
}
