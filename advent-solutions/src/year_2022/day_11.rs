//! Monkey in the middle: item passing with worry levels

use crate::utils::parse::sections;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["2022"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(u64),
    Mul(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> Option<u64> {
        match self {
            Operation::Add(n) => old.checked_add(n),
            Operation::Mul(n) => old.checked_mul(n),
            Operation::Square => old.checked_mul(old),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

fn field<'a>(line: Option<&'a str>, prefix: &str) -> anyhow::Result<&'a str> {
    line.map(str::trim)
        .and_then(|line| line.strip_prefix(prefix))
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected a line starting with '{prefix}'"))
}

fn parse_monkey(section: &str, index: usize) -> anyhow::Result<Monkey> {
    let mut lines = section.lines();
    let header = field(lines.next(), "Monkey")?;
    if header.trim_end_matches(':') != index.to_string() {
        bail!("monkey {index} is labelled '{header}'");
    }
    let items = field(lines.next(), "Starting items:")?
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .map(|item| item.trim().parse().with_context(|| format!("invalid item '{item}'")))
        .collect::<anyhow::Result<_>>()?;
    let operation = match field(lines.next(), "Operation: new = old")?.split_once(' ') {
        Some(("*", "old")) => Operation::Square,
        Some(("*", n)) => Operation::Mul(n.parse().with_context(|| format!("invalid factor '{n}'"))?),
        Some(("+", n)) => Operation::Add(n.parse().with_context(|| format!("invalid term '{n}'"))?),
        _ => bail!("unsupported operation"),
    };
    let number = |line: Option<&str>, prefix: &str| -> anyhow::Result<u64> {
        let value = field(line, prefix)?;
        value.parse().with_context(|| format!("invalid number '{value}'"))
    };
    let divisor = number(lines.next(), "Test: divisible by")?;
    if divisor == 0 {
        bail!("monkey {index} tests divisibility by zero");
    }
    let if_true = number(lines.next(), "If true: throw to monkey")? as usize;
    let if_false = number(lines.next(), "If false: throw to monkey")? as usize;
    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let monkeys = sections(input)
            .into_iter()
            .enumerate()
            .map(|(idx, section)| {
                parse_monkey(section, idx)
                    .map_err(|e| ParseError::InvalidFormat(format!("(monkey {idx}) {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if monkeys.is_empty() {
            return Err(ParseError::MissingData("no monkeys".into()));
        }
        if let Some(m) = monkeys.iter().find(|m| m.if_true.max(m.if_false) >= monkeys.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "throw target {} does not exist",
                m.if_true.max(m.if_false)
            )));
        }
        Ok(monkeys)
    }
}

/// Product of the two largest inspection counts after `rounds`
///
/// With `relief` worry drops to a third after each inspection. Without it
/// worry is kept modulo the product of every divisor, which preserves each
/// divisibility test.
fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> Result<u64, SolveError> {
    let modulus: u64 = monkeys.iter().map(|m| m.divisor).product();
    let mut holding: Vec<Vec<u64>> = monkeys.iter().map(|m| m.items.clone()).collect();
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for (idx, monkey) in monkeys.iter().enumerate() {
            let items = std::mem::take(&mut holding[idx]);
            inspected[idx] += items.len() as u64;
            for item in items {
                let mut worry = monkey
                    .operation
                    .apply(item)
                    .ok_or_else(|| SolveError::failed("worry level overflowed"))?;
                if relief {
                    worry /= 3;
                } else {
                    worry %= modulus;
                }
                let target = if worry % monkey.divisor == 0 {
                    monkey.if_true
                } else {
                    monkey.if_false
                };
                holding[target].push(worry);
            }
        }
    }

    Ok(inspected.into_iter().sorted_unstable().rev().take(2).product())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        monkey_business(shared, 20, true).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        monkey_business(shared, 10_000, false).map(|n| n.to_string())
    }
}
