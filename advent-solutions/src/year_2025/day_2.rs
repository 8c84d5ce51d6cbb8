//! Gift shop IDs: sum the IDs that are a digit block repeated

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};
use std::collections::HashSet;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<RangeInclusive<u64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|range| !range.is_empty())
            .enumerate()
            .map(|(range_idx, range)| {
                parse_range(range)
                    .map_err(|e| anyhow!("(range {}) {}", range_idx + 1, e))
            })
            .collect::<Result<_, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_range(range: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected 'start-end', found '{range}'"))?;
    let start: u64 = start.parse().with_context(|| format!("invalid start '{start}'"))?;
    let end: u64 = end.parse().with_context(|| format!("invalid end '{end}'"))?;
    if start > end {
        return Err(anyhow!("range {start}-{end} is empty"));
    }
    Ok(start..=end)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, Some(2)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, None).to_string())
    }
}

/// Sum of every repeated ID; `u128` because wide ranges overflow `u64`
fn sum_repeated(ranges: &[RangeInclusive<u64>], repeats: Option<u32>) -> u128 {
    ranges
        .iter()
        .flat_map(|range| repeated_ids(range, repeats))
        .map(u128::from)
        .sum()
}

fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().unwrap_or(0) + 1
}

/// IDs inside `range` made of one digit block written `repeats` times
/// (any count of at least two when `None`)
///
/// Candidates are generated as `block * multiplier`, where the multiplier is
/// `1 0..01 0..01` with one `1` per repetition, instead of scanning the range.
fn repeated_ids(range: &RangeInclusive<u64>, repeats: Option<u32>) -> HashSet<u64> {
    let mut ids = HashSet::new();

    for length in digit_count(*range.start())..=digit_count(*range.end()) {
        for block_len in 1..=length / 2 {
            if length % block_len != 0 {
                continue;
            }
            let count = length / block_len;
            if repeats.is_some_and(|repeats| repeats != count) {
                continue;
            }

            let shift = 10u64.pow(block_len);
            let multiplier = (0..count).fold(0u64, |acc, _| acc * shift + 1);
            let lowest_block = (*range.start()).div_ceil(multiplier).max(shift / 10);
            let highest_block = (*range.end() / multiplier).min(shift - 1);

            ids.extend((lowest_block..=highest_block).map(|block| block * multiplier));
        }
    }
    ids
}
