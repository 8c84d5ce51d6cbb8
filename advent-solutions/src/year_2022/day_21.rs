//! Monkey math: evaluating and inverting an expression tree

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["2022"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job<'a> {
    Number(i64),
    Math(&'a str, Op, &'a str),
}

fn parse_job(line: &str) -> anyhow::Result<(&str, Job<'_>)> {
    let (name, job) = line
        .split_once(": ")
        .ok_or_else(|| anyhow!("expected 'NAME: JOB'"))?;
    let words: Vec<&str> = job.split_whitespace().collect();
    let job = match words[..] {
        [number] => Job::Number(number.parse().with_context(|| format!("invalid number '{number}'"))?),
        [left, op, right] => {
            let op = match op {
                "+" => Op::Add,
                "-" => Op::Sub,
                "*" => Op::Mul,
                "/" => Op::Div,
                other => bail!("unknown operator '{other}'"),
            };
            Job::Math(left, op, right)
        }
        _ => bail!("unrecognised job '{job}'"),
    };
    Ok((name, job))
}

impl AocParser for Solver {
    type SharedData<'a> = HashMap<&'a str, Job<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jobs: HashMap<_, _> = parse_lines(input, parse_job)?.into_iter().collect();
        for name in [ROOT, HUMAN] {
            if !jobs.contains_key(name) {
                return Err(ParseError::MissingData(format!("no monkey named '{name}'")));
            }
        }
        Ok(jobs)
    }
}

struct Troop<'j, 'a> {
    jobs: &'j HashMap<&'a str, Job<'a>>,
}

impl<'a> Troop<'_, 'a> {
    fn job(&self, name: &str) -> Result<Job<'a>, SolveError> {
        self.jobs
            .get(name)
            .copied()
            .ok_or_else(|| SolveError::failed(format!("no monkey named '{name}'")))
    }

    /// Value yelled by `name`; `depth` bounds the recursion on cyclic input
    fn eval(&self, name: &str, depth: usize) -> Result<i64, SolveError> {
        if depth > self.jobs.len() {
            return Err(SolveError::failed(format!("monkey '{name}' depends on itself")));
        }
        match self.job(name)? {
            Job::Number(n) => Ok(n),
            Job::Math(left, op, right) => {
                let (a, b) = (self.eval(left, depth + 1)?, self.eval(right, depth + 1)?);
                let value = match op {
                    Op::Add => a.checked_add(b),
                    Op::Sub => a.checked_sub(b),
                    Op::Mul => a.checked_mul(b),
                    Op::Div => a.checked_div(b),
                };
                value.ok_or_else(|| SolveError::failed(format!("'{name}' overflows or divides by zero")))
            }
        }
    }

    /// Whether the human's number feeds into `name`
    fn needs_human(&self, name: &str, depth: usize) -> Result<bool, SolveError> {
        if name == HUMAN {
            return Ok(true);
        }
        if depth > self.jobs.len() {
            return Err(SolveError::failed(format!("monkey '{name}' depends on itself")));
        }
        match self.job(name)? {
            Job::Number(_) => Ok(false),
            Job::Math(left, _, right) => {
                Ok(self.needs_human(left, depth + 1)? || self.needs_human(right, depth + 1)?)
            }
        }
    }

    /// Human number that makes `name` yell `target`
    fn solve_for_human(&self, name: &str, target: i64) -> Result<i64, SolveError> {
        let mut name = name;
        let mut target = target;
        while name != HUMAN {
            let Job::Math(left, op, right) = self.job(name)? else {
                return Err(SolveError::failed(format!("'{name}' does not depend on the human")));
            };
            let human_left = self.needs_human(left, 0)?;
            let (unknown, known) = if human_left { (left, right) } else { (right, left) };
            let k = self.eval(known, 0)?;
            target = match (op, human_left) {
                (Op::Add, _) => target - k,
                (Op::Mul, _) if k != 0 && target % k == 0 => target / k,
                (Op::Sub, true) => target + k,
                (Op::Sub, false) => k - target,
                (Op::Div, true) => target * k,
                (Op::Div, false) if target != 0 && k % target == 0 => k / target,
                _ => {
                    return Err(SolveError::failed(format!(
                        "no whole number satisfies '{name}'"
                    )));
                }
            };
            name = unknown;
        }
        Ok(target)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Troop { jobs: shared }.eval(ROOT, 0).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Root compares its two operands for equality
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let troop = Troop { jobs: shared };
        let Job::Math(left, _, right) = troop.job(ROOT)? else {
            return Err(SolveError::failed("root yells a plain number"));
        };
        let (unknown, known) = if troop.needs_human(left, 0)? {
            (left, right)
        } else {
            (right, left)
        };
        let target = troop.eval(known, 0)?;
        troop.solve_for_human(unknown, target).map(|n| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "root: pppw + sjmn
dbpl: 5
cczh: sllz + lgvd
zczc: 2
ptdq: humn - dvpt
dvpt: 3
lfqf: 4
humn: 5
ljgn: 2
sjmn: drzm * dbpl
sllz: 4
pppw: cczh / lfqf
lgvd: ljgn * ptdq
drzm: hmdt - zczc
hmdt: 32
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 21, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "152");
        assert_eq!(solver.solve(2).unwrap().answer, "301");
    }

    #[test]
    fn test_human_on_the_right_of_subtraction() {
        // root: a = 10 - humn, b = 4, so humn = 6
        let input = "root: a + b\na: ten - humn\nten: 10\nb: 4\nhumn: 0\n";
        let mut solver = SolverInstance::<Solver>::new(2022, 21, input).unwrap();
        assert_eq!(solver.solve(2).unwrap().answer, "6");
    }

    #[test]
    fn test_cyclic_monkeys_fail() {
        let input = "root: a + humn\na: root * humn\nhumn: 1\n";
        let mut solver = SolverInstance::<Solver>::new(2022, 21, input).unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
    }
}
