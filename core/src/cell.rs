use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// Visibility of a cell to the player.
///
/// Only `Flagged <-> Hidden` goes both ways, a revealed cell stays revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellStatus {
    /// Closed cells are the ones the player cannot see into yet.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// What a cell holds: the number of adjacent mines, or a mine itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Hint(u8),
    Mine,
}

impl Default for Content {
    fn default() -> Self {
        Self::Hint(0)
    }
}

/// A single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    x: Coord,
    y: Coord,
    content: Content,
    status: CellStatus,
}

impl Cell {
    pub(crate) const fn new(x: Coord, y: Coord) -> Self {
        Self {
            x,
            y,
            content: Content::Hint(0),
            status: CellStatus::Hidden,
        }
    }

    pub const fn x(&self) -> Coord {
        self.x
    }

    pub const fn y(&self) -> Coord {
        self.y
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn content(&self) -> Content {
        self.content
    }

    pub const fn status(&self) -> CellStatus {
        self.status
    }

    /// Number of adjacent mines, `None` when the cell is mined itself.
    pub const fn hint(&self) -> Option<u8> {
        match self.content {
            Content::Hint(count) => Some(count),
            Content::Mine => None,
        }
    }

    pub const fn has_mine(&self) -> bool {
        matches!(self.content, Content::Mine)
    }

    /// Replaces whatever hint the cell had. Does not touch the neighbours, see
    /// [`Field::plant_mines_at`](crate::Field::plant_mines_at) for that.
    pub fn plant_mine(&mut self) {
        self.content = Content::Mine;
    }

    pub const fn has_flag(&self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }

    /// Callers are expected to only flag hidden cells.
    pub fn set_flag(&mut self) {
        self.status = CellStatus::Flagged;
    }

    pub fn remove_flag(&mut self) {
        self.status = CellStatus::Hidden;
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.status, CellStatus::Revealed)
    }

    pub const fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn reveal(&mut self) {
        self.status = CellStatus::Revealed;
    }

    /// Count one more adjacent mine, mined cells keep their marker.
    pub(crate) fn bump_hint(&mut self) {
        if let Content::Hint(count) = &mut self.content {
            *count += 1;
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Cell x={} y={}>", self.x, self.y)
    }
}
