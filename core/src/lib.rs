//! Minefield model: a fixed-size grid of cells, random mine placement with
//! hint derivation, flood-reveal, and the win/loss policy a controller runs
//! on top of it.

pub use cell::*;
pub use error::*;
pub use field::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod field;
mod session;
mod types;
