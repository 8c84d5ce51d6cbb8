//! Beacon exclusion zone: sensor coverage diamonds

use crate::utils::parse::parse_lines;
use crate::utils::vec2::Vec2;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{bail, Context};
use itertools::Itertools;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["2022"])]
pub struct Solver;

/// Sensors farther out than this mean a full puzzle input
const EXAMPLE_EXTENT: i64 = 1000;
const EXAMPLE_ROW: i64 = 10;
const EXAMPLE_BOUND: i64 = 20;
const FULL_ROW: i64 = 2_000_000;
const FULL_BOUND: i64 = 4_000_000;
const TUNING_FACTOR: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    at: Vec2,
    beacon: Vec2,
    radius: i64,
}

impl Sensor {
    fn covers(&self, p: Vec2) -> bool {
        (p - self.at).manhattan() <= self.radius
    }

    /// Columns this sensor covers on row `y`
    fn row_span(&self, y: i64) -> Option<(i64, i64)> {
        let arm = self.radius - (y - self.at.y).abs();
        (arm >= 0).then_some((self.at.x - arm, self.at.x + arm))
    }
}

fn parse_sensor(line: &str) -> anyhow::Result<Sensor> {
    let numbers: Vec<i64> = line
        .split(|c: char| !(c.is_ascii_digit() || c == '-'))
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().with_context(|| format!("invalid coordinate '{s}'")))
        .collect::<anyhow::Result<_>>()?;
    let [sx, sy, bx, by] = numbers[..] else {
        bail!("expected sensor and beacon coordinates, found {} numbers", numbers.len());
    };
    let (at, beacon) = (Vec2::new(sx, sy), Vec2::new(bx, by));
    Ok(Sensor {
        at,
        beacon,
        radius: (beacon - at).manhattan(),
    })
}

#[derive(Debug, Clone)]
pub struct SharedData {
    sensors: Vec<Sensor>,
    row: i64,
    bound: i64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sensors = parse_lines(input, parse_sensor)?;
        if sensors.is_empty() {
            return Err(ParseError::MissingData("no sensors".into()));
        }
        let example = sensors.iter().all(|s| s.at.chebyshev() < EXAMPLE_EXTENT);
        let (row, bound) = if example {
            (EXAMPLE_ROW, EXAMPLE_BOUND)
        } else {
            (FULL_ROW, FULL_BOUND)
        };
        Ok(SharedData { sensors, row, bound })
    }
}

/// Positions on row `y` where no beacon can be
fn excluded_on_row(sensors: &[Sensor], y: i64) -> i64 {
    let mut covered = 0;
    let mut reach = i64::MIN;
    for (start, end) in sensors.iter().filter_map(|s| s.row_span(y)).sorted_unstable() {
        if end > reach {
            covered += end - start.max(reach + 1) + 1;
            reach = end;
        }
    }
    let beacons: HashSet<Vec2> = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|b| b.y == y)
        .collect();
    covered - beacons.len() as i64
}

/// The single uncovered position inside `0..=bound` on both axes
///
/// A lone gap sits just outside at least two diamond edges, so candidates
/// are the crossings of those edge lines plus the corners of the area.
fn distress_beacon(sensors: &[Sensor], bound: i64) -> Option<Vec2> {
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    for s in sensors {
        let r = s.radius + 1;
        rising.extend([s.at.y - s.at.x - r, s.at.y - s.at.x + r]);
        falling.extend([s.at.y + s.at.x - r, s.at.y + s.at.x + r]);
    }

    let crossings = rising
        .iter()
        .cartesian_product(&falling)
        .filter(|&(a, b)| (b - a) % 2 == 0)
        .map(|(a, b)| Vec2::new((b - a) / 2, (a + b) / 2));
    let corners = [(0, 0), (0, bound), (bound, 0), (bound, bound)].map(Vec2::from);

    crossings.chain(corners).find(|&p| {
        (0..=bound).contains(&p.x)
            && (0..=bound).contains(&p.y)
            && !sensors.iter().any(|s| s.covers(p))
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(excluded_on_row(&shared.sensors, shared.row).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        distress_beacon(&shared.sensors, shared.bound)
            .map(|p| (p.x * TUNING_FACTOR + p.y).to_string())
            .ok_or_else(|| SolveError::failed("every position is covered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{DynSolver, SolverInstance};

    const EXAMPLE: &str = "Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<Solver>::new(2022, 15, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "26");
        assert_eq!(solver.solve(2).unwrap().answer, "56000011");
    }

    #[test]
    fn test_radius_is_manhattan() {
        let sensor = parse_sensor("Sensor at x=8, y=7: closest beacon is at x=2, y=10").unwrap();
        assert_eq!(sensor.radius, 9);
        assert_eq!(sensor.row_span(10), Some((2, 14)));
        assert_eq!(sensor.row_span(17), None);
    }

    #[test]
    fn test_far_sensors_use_full_search_area() {
        let input = "Sensor at x=3000000, y=10: closest beacon is at x=3000001, y=10";
        let shared = Solver::parse(input).unwrap();
        assert_eq!((shared.row, shared.bound), (FULL_ROW, FULL_BOUND));
    }
}
