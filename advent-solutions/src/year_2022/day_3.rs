//! Rucksack reorganization

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022"])]
pub struct Solver;

/// Item priorities as bit sets, one per compartment
pub type Rucksack = (u64, u64);

fn priority(item: u8) -> anyhow::Result<u32> {
    match item {
        b'a'..=b'z' => Ok(u32::from(item - b'a') + 1),
        b'A'..=b'Z' => Ok(u32::from(item - b'A') + 27),
        other => Err(anyhow!("unexpected item '{}'", other as char)),
    }
}

fn item_set(items: &[u8]) -> anyhow::Result<u64> {
    items
        .iter()
        .try_fold(0u64, |set, &item| Ok(set | 1 << priority(item)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rucksack>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let items = line.trim().as_bytes();
            if items.len() % 2 != 0 {
                bail!("{} items cannot be split into two compartments", items.len());
            }
            let (left, right) = items.split_at(items.len() / 2);
            Ok((item_set(left)?, item_set(right)?))
        })
    }
}

/// Priority of the single item common to every set
fn common_priority(sets: impl IntoIterator<Item = u64>) -> Result<u32, SolveError> {
    let common = sets.into_iter().fold(u64::MAX, |acc, set| acc & set);
    if common.count_ones() == 1 {
        Ok(common.trailing_zeros())
    } else {
        Err(SolveError::failed(format!(
            "expected exactly one shared item, found {}",
            common.count_ones()
        )))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|&(left, right)| common_priority([left, right]))
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed("elves do not split into groups of three"));
        }
        shared
            .chunks(3)
            .map(|group| common_priority(group.iter().map(|&(left, right)| left | right)))
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "\
vJrwpWtwJgWrhcsFMMfFFhFp
jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
PmmdzqPrVvPwwTWBwg
wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
ttgJtRGJQctTZtZT
CrZsJsPPZsGzwwsLwLmpwMDw
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 3, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "157");
        assert_eq!(solver.solve(2).unwrap().answer, "70");
    }

    #[test]
    fn test_priorities() {
        assert_eq!(priority(b'a').unwrap(), 1);
        assert_eq!(priority(b'Z').unwrap(), 52);
        assert!(priority(b'1').is_err());
    }

    #[test]
    fn test_odd_rucksack_is_rejected() {
        assert!(matches!(
            SolverInstance::<Solver>::new(2022, 3, "abc"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
