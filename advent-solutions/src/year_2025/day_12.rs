//! Christmas tree farm: packing presents under the trees

use crate::utils::parse::sections;
use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail, Context};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 12, tags = ["2025"])]
pub struct Solver;

/// All distinct rotations and reflections of one present
#[derive(Debug)]
pub struct Shape {
    area: usize,
    /// Bounding box side of the largest dimension
    extent: usize,
    /// Cell offsets `(dy, dx)` from the first cell in row-major order
    orientations: Vec<Vec<(usize, isize)>>,
}

impl Shape {
    fn new(cells: Vec<(usize, usize)>) -> Self {
        let mut orientations: Vec<Vec<(usize, usize)>> = Vec::with_capacity(8);
        let mut current = normalize(cells);
        for _ in 0..4 {
            orientations.push(mirror(&current));
            let rotated = rotate(&current);
            orientations.push(std::mem::replace(&mut current, rotated));
        }
        let orientations: Vec<_> = orientations.into_iter().unique().collect();

        let area = orientations.first().map_or(0, Vec::len);
        let extent = orientations
            .first()
            .into_iter()
            .flatten()
            .map(|&(y, x)| y.max(x) + 1)
            .max()
            .unwrap_or(0);
        let orientations = orientations
            .into_iter()
            .map(|cells| {
                let (ay, ax) = cells[0];
                cells
                    .iter()
                    .map(|&(y, x)| (y - ay, x as isize - ax as isize))
                    .collect()
            })
            .collect();

        Self {
            area,
            extent,
            orientations,
        }
    }
}

/// Quarter turn clockwise
fn rotate(cells: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let max_y = cells.iter().map(|c| c.0).max().unwrap_or(0);
    normalize(cells.iter().map(|&(y, x)| (x, max_y - y)).collect())
}

/// Left-right reflection
fn mirror(cells: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let max_x = cells.iter().map(|c| c.1).max().unwrap_or(0);
    normalize(cells.iter().map(|&(y, x)| (y, max_x - x)).collect())
}

/// Shift cells to the origin and sort them row-major
fn normalize(cells: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let min_y = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_x = cells.iter().map(|c| c.1).min().unwrap_or(0);
    cells
        .into_iter()
        .map(|(y, x)| (y - min_y, x - min_x))
        .sorted_unstable()
        .collect()
}

#[derive(Debug)]
pub struct Region {
    width: usize,
    height: usize,
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct SharedData {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_farm(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_farm(input: &str) -> anyhow::Result<SharedData> {
    let mut shapes = Vec::new();
    let mut regions = Vec::new();

    for section in sections(input) {
        let mut lines = section.lines();
        let header = lines.next().unwrap_or_default().trim();
        if let Some(id) = header.strip_suffix(':') {
            let id: usize = id.parse().with_context(|| format!("invalid present '{id}'"))?;
            if id != shapes.len() {
                bail!("present {id} listed out of order");
            }
            let cells: Vec<(usize, usize)> = lines
                .enumerate()
                .flat_map(|(y, row)| {
                    row.trim()
                        .bytes()
                        .enumerate()
                        .filter(|&(_, b)| b == b'#')
                        .map(move |(x, _)| (y, x))
                })
                .collect();
            if cells.is_empty() {
                bail!("present {id} has no cells");
            }
            shapes.push(Shape::new(cells));
        } else {
            for line in section.lines() {
                regions.push(parse_region(line).with_context(|| format!("region '{line}'"))?);
            }
        }
    }

    if let Some(region) = regions.iter().find(|r| r.counts.len() != shapes.len()) {
        bail!(
            "region lists {} present counts for {} presents",
            region.counts.len(),
            shapes.len()
        );
    }
    Ok(SharedData { shapes, regions })
}

fn parse_region(line: &str) -> anyhow::Result<Region> {
    let (size, counts) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("expected 'WxH: counts...'"))?;
    let (width, height) = size
        .trim()
        .split_once('x')
        .ok_or_else(|| anyhow!("expected size 'WxH'"))?;
    Ok(Region {
        width: width.parse().context("invalid width")?,
        height: height.parse().context("invalid height")?,
        counts: counts
            .split_whitespace()
            .map(|c| c.parse().with_context(|| format!("invalid count '{c}'")))
            .collect::<anyhow::Result<_>>()?,
    })
}

impl Region {
    fn fits(&self, shapes: &[Shape]) -> bool {
        let presents: usize = self.counts.iter().sum();
        let extent = shapes.iter().map(|s| s.extent).max().unwrap_or(1).max(1);
        if (self.width / extent) * (self.height / extent) >= presents {
            return true;
        }

        let needed: usize = self.counts.iter().zip(shapes).map(|(c, s)| c * s.area).sum();
        let available = self.width * self.height;
        if needed > available {
            return false;
        }

        Packing {
            width: self.width,
            filled: vec![false; available],
            remaining: self.counts.clone(),
            left: presents,
            slack: available - needed,
            shapes,
        }
        .search(0)
    }
}

/// Backtracking over cells in row-major order: the first open cell is either
/// the first cell of some present or stays empty
struct Packing<'s> {
    width: usize,
    filled: Vec<bool>,
    remaining: Vec<usize>,
    left: usize,
    slack: usize,
    shapes: &'s [Shape],
}

impl Packing<'_> {
    fn cells(&self, cell: usize, offsets: &[(usize, isize)]) -> Option<Vec<usize>> {
        let (y, x) = (cell / self.width, cell % self.width);
        offsets
            .iter()
            .map(|&(dy, dx)| {
                let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.width)?;
                let idx = (y + dy) * self.width + nx;
                (idx < self.filled.len() && !self.filled[idx]).then_some(idx)
            })
            .collect()
    }

    fn search(&mut self, from: usize) -> bool {
        if self.left == 0 {
            return true;
        }
        let Some(cell) = (from..self.filled.len()).find(|&idx| !self.filled[idx]) else {
            return false;
        };

        let shapes = self.shapes;
        for (shape_idx, shape) in shapes.iter().enumerate() {
            if self.remaining[shape_idx] == 0 {
                continue;
            }
            for offsets in &shape.orientations {
                let Some(cells) = self.cells(cell, offsets) else {
                    continue;
                };
                cells.iter().for_each(|&idx| self.filled[idx] = true);
                self.remaining[shape_idx] -= 1;
                self.left -= 1;

                let found = self.search(cell + 1);

                self.left += 1;
                self.remaining[shape_idx] += 1;
                cells.iter().for_each(|&idx| self.filled[idx] = false);
                if found {
                    return true;
                }
            }
        }

        if self.slack > 0 {
            self.slack -= 1;
            self.filled[cell] = true;
            let found = self.search(cell + 1);
            self.filled[cell] = false;
            self.slack += 1;
            return found;
        }
        false
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .iter()
            .filter(|region| region.fits(&shared.shapes))
            .count();
        Ok(fitting.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("Merry Christmas!".to_string())
    }
}
