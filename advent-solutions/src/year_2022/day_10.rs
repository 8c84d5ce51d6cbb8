//! Cathode-ray tube: register trace of a tiny CPU

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{bail, Context};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["2022"])]
pub struct Solver;

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;
const FIRST_SAMPLE: usize = 20;
const LAST_SAMPLE: usize = 220;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Noop,
    AddX(i64),
}

impl AocParser for Solver {
    /// Value of `X` during each cycle, first cycle at index 0
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let program = parse_lines(input, |line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            match words[..] {
                ["noop"] => Ok(Instruction::Noop),
                ["addx", value] => value
                    .parse()
                    .map(Instruction::AddX)
                    .with_context(|| format!("invalid operand '{value}'")),
                _ => bail!("unknown instruction '{line}'"),
            }
        })?;

        let mut x = 1;
        let mut trace = Vec::with_capacity(program.len() * 2);
        for instruction in program {
            match instruction {
                Instruction::Noop => trace.push(x),
                Instruction::AddX(value) => {
                    trace.extend([x, x]);
                    x += value;
                }
            }
        }
        Ok(trace)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let strength: i64 = (FIRST_SAMPLE..=LAST_SAMPLE)
            .step_by(SCREEN_WIDTH)
            .filter_map(|cycle| shared.get(cycle - 1).map(|&x| cycle as i64 * x))
            .sum();
        Ok(strength.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The lit screen, one line per row
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() < SCREEN_WIDTH * SCREEN_HEIGHT {
            return Err(SolveError::failed(format!(
                "program runs {} cycles, the screen needs {}",
                shared.len(),
                SCREEN_WIDTH * SCREEN_HEIGHT
            )));
        }
        let rows: Vec<String> = shared
            .chunks(SCREEN_WIDTH)
            .take(SCREEN_HEIGHT)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, &x)| if (col as i64 - x).abs() <= 1 { '#' } else { '.' })
                    .collect()
            })
            .collect();
        Ok(rows.join("\n"))
    }
}
