use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Fixed-size grid of cells, stored row-major (`y * width + x`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    cells: Array2<Cell>,
}

impl Field {
    /// Creates a `width` x `height` field of hidden cells without mines.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidSize { width, height });
        }

        let shape = (usize::from(height), usize::from(width));
        let cells = Array2::from_shape_fn(shape, |(y, x)| Cell::new(x as Coord, y as Coord));
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(FieldError::OutOfRange {
                x: coords.0,
                y: coords.1,
                width,
                height,
            })
        }
    }

    pub fn cell(&self, x: Coord, y: Coord) -> Result<&Cell> {
        let coords = self.validate_coords((x, y))?;
        Ok(&self[coords])
    }

    pub fn cell_mut(&mut self, x: Coord, y: Coord) -> Result<&mut Cell> {
        let coords = self.validate_coords((x, y))?;
        Ok(&mut self[coords])
    }

    /// All cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The up to 8 cells around `(x, y)`, in row-major order of the 3x3
    /// neighbourhood. Never includes the cell itself.
    pub fn adjacent_cells(&self, x: Coord, y: Coord) -> Result<impl Iterator<Item = &Cell>> {
        let coords = self.validate_coords((x, y))?;
        Ok(self.neighbors(coords).map(move |pos| &self[pos]))
    }

    /// Adjacent cells that are still hidden, flagged ones are left out.
    pub fn adjacent_closed_cells(
        &self,
        x: Coord,
        y: Coord,
    ) -> Result<impl Iterator<Item = &Cell>> {
        Ok(self
            .adjacent_cells(x, y)?
            .filter(|cell| cell.status() == CellStatus::Hidden))
    }

    pub fn cells_with_mines(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.has_mine())
    }

    /// Cells that are not revealed yet, flagged ones included.
    pub fn closed_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.is_closed())
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells_with_mines()
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Places `count` mines on uniformly random cells and derives the hints.
    ///
    /// The same `seed` always yields the same layout. Without one a fresh seed
    /// is drawn from the thread-local generator. Returns the seed that was used.
    pub fn plant_random_mines(&mut self, count: CellCount, seed: Option<u64>) -> Result<u64> {
        use rand::prelude::*;

        let capacity = self.total_cells();
        if count > capacity {
            return Err(FieldError::TooManyMines {
                requested: count,
                capacity,
            });
        }
        self.check_unmined()?;

        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut sites: Vec<Coord2> = self.cells().map(Cell::coords).collect();
        sites.shuffle(&mut rng);
        sites.truncate(count.into());

        log::debug!("Planting {} mines with seed {}", count, seed);
        self.plant_sites(&sites);
        Ok(seed)
    }

    /// Places mines at exactly the given coordinates and derives the hints.
    ///
    /// Repeated coordinates are planted once.
    pub fn plant_mines_at(&mut self, sites: &[Coord2]) -> Result<()> {
        for &coords in sites {
            self.validate_coords(coords)?;
        }
        self.check_unmined()?;

        log::debug!("Planting mines at {:?}", sites);
        self.plant_sites(sites);
        Ok(())
    }

    fn check_unmined(&self) -> Result<()> {
        if self.cells().any(Cell::has_mine) {
            Err(FieldError::MinesAlreadyPlanted)
        } else {
            Ok(())
        }
    }

    /// Mines and hints are accumulated per site, so a neighbour is only counted
    /// up while it is not mined; planting it later overwrites its count.
    fn plant_sites(&mut self, sites: &[Coord2]) {
        for &site in sites {
            if self[site].has_mine() {
                continue;
            }
            self[site].plant_mine();

            for pos in self.neighbors(site) {
                let neighbor = &mut self[pos];
                if !neighbor.has_mine() {
                    neighbor.bump_hint();
                }
            }
        }
    }

    /// Reveals `(x, y)` and floods outwards through zero-hint cells.
    ///
    /// Returns the coordinates of every cell revealed, in reveal order, starting
    /// with `(x, y)` itself.
    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<Vec<Coord2>> {
        let mut revealed = Vec::new();
        self.reveal_with(x, y, |cell| revealed.push(cell.coords()))?;
        Ok(revealed)
    }

    /// Same as [`Field::reveal`], handing each revealed cell to `on_reveal`.
    ///
    /// The clicked cell is revealed whatever its status. Propagation only
    /// enters hidden cells, so flags stop the flood and a mine is never reached
    /// this way (its neighbours all have a non-zero hint).
    pub fn reveal_with<F>(&mut self, x: Coord, y: Coord, mut on_reveal: F) -> Result<()>
    where
        F: FnMut(&Cell),
    {
        let origin = self.validate_coords((x, y))?;

        let mut to_visit = VecDeque::new();
        self.reveal_single_cell(origin, &mut to_visit, &mut on_reveal);

        while let Some(coords) = to_visit.pop_front() {
            // may have been queued by more than one zero neighbour
            if self[coords].status() != CellStatus::Hidden {
                continue;
            }
            self.reveal_single_cell(coords, &mut to_visit, &mut on_reveal);
        }
        Ok(())
    }

    fn reveal_single_cell<F>(
        &mut self,
        coords: Coord2,
        to_visit: &mut VecDeque<Coord2>,
        on_reveal: &mut F,
    ) where
        F: FnMut(&Cell),
    {
        self[coords].reveal();
        let cell = &self[coords];
        log::trace!("Revealed cell at {:?}: {:?}", coords, cell.content());
        on_reveal(cell);

        if cell.hint() == Some(0) {
            to_visit.extend(
                self.neighbors(coords)
                    .filter(|&pos| self[pos].status() == CellStatus::Hidden),
            );
        }
    }

    /// Whether every closed cell is a flagged mine.
    pub fn is_cleared(&self) -> bool {
        self.closed_cells().all(|cell| cell.has_flag() && cell.has_mine())
    }

    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Field {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Field {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Debug rendering: column indices on top, then per row its index followed by
/// the hint of each cell, or `x` for a mine.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..self.width() {
            write!(f, "{}", x)?;
        }
        writeln!(f)?;

        for (y, row) in self.cells.rows().into_iter().enumerate() {
            write!(f, "{} ", y)?;
            for cell in row {
                match cell.content() {
                    Content::Mine => write!(f, "x")?,
                    Content::Hint(count) => write!(f, "{}", count)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
