//! Distress signal: ordering nested packets

use crate::utils::parse::parse_lines;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail};
use std::cmp::Ordering;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["2022"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Int(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(a), Packet::Int(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Int(a), Packet::List(b)) => [Packet::Int(*a)][..].cmp(b),
            (Packet::List(a), Packet::Int(b)) => a[..].cmp(&[Packet::Int(*b)]),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::str::FromStr for Packet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let bytes = s.as_bytes();
        let (packet, used) = parse_packet(bytes)?;
        if used != bytes.len() {
            bail!("trailing data after packet at column {}", used + 1);
        }
        Ok(packet)
    }
}

/// Parse one packet from the front of `bytes`, returning it and the bytes used
fn parse_packet(bytes: &[u8]) -> anyhow::Result<(Packet, usize)> {
    match bytes.first() {
        Some(b'[') => {
            let mut items = Vec::new();
            let mut pos = 1;
            if bytes.get(pos) == Some(&b']') {
                return Ok((Packet::List(items), pos + 1));
            }
            loop {
                let (item, used) = parse_packet(&bytes[pos..])?;
                items.push(item);
                pos += used;
                match bytes.get(pos) {
                    Some(b',') => pos += 1,
                    Some(b']') => return Ok((Packet::List(items), pos + 1)),
                    _ => bail!("expected ',' or ']' at column {}", pos + 1),
                }
            }
        }
        Some(b) if b.is_ascii_digit() => {
            let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            let text = std::str::from_utf8(&bytes[..len])?;
            Ok((Packet::Int(text.parse()?), len))
        }
        Some(&other) => bail!("unexpected '{}'", other as char),
        None => Err(anyhow!("packet ends early")),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets = parse_lines(input, str::parse::<Packet>)?;
        if packets.len() % 2 != 0 {
            return Err(ParseError::MissingData("last packet has no partner".into()));
        }
        Ok(packets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .chunks(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(idx, _)| idx + 1)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let divider = |n| Packet::List(vec![Packet::List(vec![Packet::Int(n)])]);
        let (first, second) = (divider(2), divider(6));
        // 1-based positions once the dividers are sorted in
        let first_pos = shared.iter().filter(|p| **p < first).count() + 1;
        let second_pos = shared.iter().filter(|p| **p < second).count() + 2;
        Ok((first_pos * second_pos).to_string())
    }
}
