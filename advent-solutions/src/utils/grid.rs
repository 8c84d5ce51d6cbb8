//! Grid traversal helpers and a dense 2-D grid

use advent_solver::ParseError;
use std::ops::{Index, IndexMut};

/// Traversal order over a `height x width` grid
///
/// Row-major visits `(0, 0), (0, 1), ...` while column-major visits
/// `(0, 0), (1, 0), ...`. Either axis can be walked backwards. Coordinates are
/// always yielded as `(y, x)`.
///
/// ```
/// use advent_solutions::utils::grid::GridOrder;
///
/// let cells: Vec<_> = GridOrder::new(2, 2).column_major().reverse_x().iter().collect();
/// assert_eq!(cells, vec![(0, 1), (1, 1), (0, 0), (1, 0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOrder {
    height: usize,
    width: usize,
    row_first: bool,
    reverse_y: bool,
    reverse_x: bool,
}

impl GridOrder {
    /// Row-major order, both axes ascending
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            row_first: true,
            reverse_y: false,
            reverse_x: false,
        }
    }

    /// Walk columns in the outer loop instead of rows
    pub fn column_major(mut self) -> Self {
        self.row_first = false;
        self
    }

    /// Walk rows bottom to top
    pub fn reverse_y(mut self) -> Self {
        self.reverse_y = true;
        self
    }

    /// Walk columns right to left
    pub fn reverse_x(mut self) -> Self {
        self.reverse_x = true;
        self
    }

    fn outer_len(&self) -> usize {
        if self.row_first { self.height } else { self.width }
    }

    fn inner_len(&self) -> usize {
        if self.row_first { self.width } else { self.height }
    }

    fn coord(&self, outer: usize, inner: usize) -> (usize, usize) {
        let (y, x) = if self.row_first {
            (outer, inner)
        } else {
            (inner, outer)
        };
        let y = if self.reverse_y { self.height - 1 - y } else { y };
        let x = if self.reverse_x { self.width - 1 - x } else { x };
        (y, x)
    }

    /// Every cell in this order
    pub fn iter(self) -> GridIter {
        GridIter {
            order: self,
            outer: 0,
            inner: 0,
        }
    }

    /// One iterator per outer line (a row, or a column when column-major)
    ///
    /// Callers that need to reset state at the start of each line iterate the
    /// outer level themselves.
    pub fn lines(self) -> impl Iterator<Item = impl Iterator<Item = (usize, usize)>> {
        (0..self.outer_len())
            .map(move |outer| (0..self.inner_len()).map(move |inner| self.coord(outer, inner)))
    }
}

/// Iterator over the cells of a [`GridOrder`]
#[derive(Debug, Clone)]
pub struct GridIter {
    order: GridOrder,
    outer: usize,
    inner: usize,
}

impl Iterator for GridIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let inner_len = self.order.inner_len();
        if inner_len == 0 || self.outer >= self.order.outer_len() {
            return None;
        }
        let item = self.order.coord(self.outer, self.inner);
        self.inner += 1;
        if self.inner == inner_len {
            self.inner = 0;
            self.outer += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let inner_len = self.order.inner_len();
        let total = self.order.outer_len() * inner_len;
        let done = self.outer * inner_len + self.inner;
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridIter {}

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const WITH_DIAGONAL: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds neighbours of `(y, x)` in a `height x width` grid
pub fn neighbours(
    height: usize,
    width: usize,
    y: usize,
    x: usize,
    include_diagonal: bool,
) -> impl Iterator<Item = (usize, usize)> {
    let offsets: &'static [(isize, isize)] = if include_diagonal {
        &WITH_DIAGONAL
    } else {
        &ORTHOGONAL
    };
    offsets.iter().filter_map(move |&(dy, dx)| {
        let ny = y.checked_add_signed(dy)?;
        let nx = x.checked_add_signed(dx)?;
        (ny < height && nx < width).then_some((ny, nx))
    })
}

/// Dense row-major grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    height: usize,
    width: usize,
}

impl<T> Grid<T> {
    /// Parse one cell per byte, one row per line
    ///
    /// Blank lines are skipped and every row must have the same width.
    pub fn parse_with<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(u8) -> Result<T, ParseError>,
    {
        let mut cells = Vec::with_capacity(input.len());
        let mut width = None;
        let mut height = 0;

        for (line_idx, line) in input.lines().filter(|line| !line.is_empty()).enumerate() {
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected width {}, found {}",
                        line_idx + 1,
                        w,
                        line.len()
                    )));
                }
                Some(_) => {}
            }
            for byte in line.bytes() {
                cells.push(cell(byte)?);
            }
            height += 1;
        }

        Ok(Self {
            cells,
            height,
            width: width.unwrap_or(0),
        })
    }

    /// `height x width` grid with every cell set to `value`
    pub fn filled(height: usize, width: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: vec![value; height * width],
            height,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, y: usize, x: usize) -> Option<&T> {
        (y < self.height && x < self.width).then(|| &self.cells[y * self.width + x])
    }

    pub fn get_mut(&mut self, y: usize, x: usize) -> Option<&mut T> {
        if y < self.height && x < self.width {
            Some(&mut self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Row-major traversal of every cell coordinate
    pub fn positions(&self) -> GridIter {
        GridOrder::new(self.height, self.width).iter()
    }

    /// First cell (row-major) matching `pred`
    pub fn find<P>(&self, mut pred: P) -> Option<(usize, usize)>
    where
        P: FnMut(&T) -> bool,
    {
        self.cells
            .iter()
            .position(|cell| pred(cell))
            .map(|i| (i / self.width, i % self.width))
    }

    /// In-bounds neighbours of `(y, x)`
    pub fn neighbours(
        &self,
        y: usize,
        x: usize,
        include_diagonal: bool,
    ) -> impl Iterator<Item = (usize, usize)> + use<T> {
        neighbours(self.height, self.width, y, x, include_diagonal)
    }

    /// Same-shaped grid filled with `value`
    pub fn same_shape<U: Clone>(&self, value: U) -> Grid<U> {
        Grid {
            cells: vec![value; self.cells.len()],
            height: self.height,
            width: self.width,
        }
    }
}

impl Grid<u8> {
    /// Raw byte grid
    pub fn from_bytes(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, Ok)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (y, x): (usize, usize)) -> &T {
        assert!(y < self.height && x < self.width, "({y}, {x}) outside grid");
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (y, x): (usize, usize)) -> &mut T {
        assert!(y < self.height && x < self.width, "({y}, {x}) outside grid");
        &mut self.cells[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_row_major_default() {
        let cells: Vec<_> = GridOrder::new(2, 3).iter().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_column_major_reversed_y() {
        let cells: Vec<_> = GridOrder::new(2, 2).column_major().reverse_y().iter().collect();
        assert_eq!(cells, vec![(1, 0), (0, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_lines_split_outer_loop() {
        let lines: Vec<Vec<_>> = GridOrder::new(3, 2)
            .column_major()
            .lines()
            .map(Iterator::collect)
            .collect();
        assert_eq!(lines, vec![vec![(0, 0), (1, 0), (2, 0)], vec![(0, 1), (1, 1), (2, 1)]]);
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        assert_eq!(GridOrder::new(0, 5).iter().count(), 0);
        assert_eq!(GridOrder::new(5, 0).iter().count(), 0);
    }

    #[test]
    fn test_neighbours_clip_at_edges() {
        let corner: HashSet<_> = neighbours(3, 3, 0, 0, true).collect();
        assert_eq!(corner, HashSet::from([(0, 1), (1, 0), (1, 1)]));

        let middle: Vec<_> = neighbours(3, 3, 1, 1, false).collect();
        assert_eq!(middle, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_grid_parse_and_lookup() {
        let grid = Grid::from_bytes("ab\ncd\n").unwrap();
        assert_eq!((grid.height(), grid.width()), (2, 2));
        assert_eq!(grid[(1, 0)], b'c');
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.find(|&b| b == b'd'), Some((1, 1)));
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        assert!(matches!(
            Grid::from_bytes("abc\nde"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_every_order_visits_each_cell_once(
            height in 0usize..8,
            width in 0usize..8,
            column_major: bool,
            reverse_y: bool,
            reverse_x: bool,
        ) {
            let mut order = GridOrder::new(height, width);
            if column_major { order = order.column_major(); }
            if reverse_y { order = order.reverse_y(); }
            if reverse_x { order = order.reverse_x(); }

            let iter = order.iter();
            prop_assert_eq!(iter.len(), height * width);

            let cells: Vec<_> = iter.collect();
            let unique: HashSet<_> = cells.iter().copied().collect();
            prop_assert_eq!(cells.len(), height * width);
            prop_assert_eq!(unique.len(), height * width);
            prop_assert!(cells.iter().all(|&(y, x)| y < height && x < width));
        }
    }
}
