use ndarray::Array2;

/// Single coordinate axis used for field width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Cells are stored row-major, so `y` selects the row and `x` the column.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        NeighborIter::new(center, (cols as Coord, rows as Coord))
    }
}

/// Coordinates of the up to 8 in-bounds neighbours of a cell, scanning the 3x3
/// window around it row by row.
///
/// The iterator owns its state, so it can be held while the grid is mutated.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    /// Inclusive corners of the window, already clipped to the grid.
    first: Coord2,
    last: Coord2,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        let (x, y) = center;
        let (width, height) = bounds;
        if width == 0 || height == 0 {
            return Self {
                center,
                first: center,
                last: center,
                cursor: None,
            };
        }

        let first = (x.saturating_sub(1), y.saturating_sub(1));
        let last = (
            x.saturating_add(1).min(width - 1),
            y.saturating_add(1).min(height - 1),
        );
        Self {
            center,
            first,
            last,
            cursor: Some(first),
        }
    }

    fn step(&self, (x, y): Coord2) -> Option<Coord2> {
        if x < self.last.0 {
            Some((x + 1, y))
        } else if y < self.last.1 {
            Some((self.first.0, y + 1))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.cursor?;
            self.cursor = self.step(pos);
            if pos != self.center {
                return Some(pos);
            }
        }
    }
}
