//! Cafeteria inventory: fresh ingredient ID ranges

use crate::utils::parse::{parse_lines, sections};
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, Context};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Sorted, non-overlapping and non-adjacent inclusive ranges
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [ranges, ids] = sections(input)[..] else {
            return Err(ParseError::MissingData(
                "expected fresh ranges and available IDs separated by a blank line".into(),
            ));
        };

        let ranges = parse_lines(ranges, |line| {
            let (start, end) = line
                .split_once('-')
                .ok_or_else(|| anyhow!("expected 'start-end', found '{line}'"))?;
            let start: u64 = start.parse().with_context(|| format!("invalid start '{start}'"))?;
            let end: u64 = end.parse().with_context(|| format!("invalid end '{end}'"))?;
            Ok((start.min(end), start.max(end)))
        })?;
        let available = parse_lines(ids, |line| {
            line.parse().with_context(|| format!("invalid ingredient ID '{line}'"))
        })?;

        Ok(SharedData {
            fresh: merge(ranges),
            available,
        })
    }
}

fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .available
            .iter()
            .filter(|&&id| is_fresh(&shared.fresh, id))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.fresh.iter().map(|(start, end)| end - start + 1).sum();
        Ok(total.to_string())
    }
}

fn is_fresh(fresh: &[(u64, u64)], id: u64) -> bool {
    let idx = fresh.partition_point(|&(start, _)| start <= id);
    idx > 0 && id <= fresh[idx - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "3-5\n10-14\n16-20\n12-18\n\n1\n5\n8\n11\n17\n32\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2025, 5, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert_eq!(solver.solve(2).unwrap().answer, "14");
    }

    #[test]
    fn test_merge_joins_overlapping_and_adjacent() {
        assert_eq!(
            merge(vec![(10, 14), (3, 5), (16, 20), (12, 18), (6, 6)]),
            vec![(3, 6), (10, 20)]
        );
    }

    #[test]
    fn test_missing_id_section() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2025, 5, "3-5\n10-14\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
