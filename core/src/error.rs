use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Coordinates ({x}, {y}) are outside of the {width}x{height} field")]
    OutOfRange {
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
    },
    #[error("Field must be at least 1x1, got {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Too many mines, requested {requested} but only {capacity} cells")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Mines were already planted on this field")]
    MinesAlreadyPlanted,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = core::result::Result<T, FieldError>;
