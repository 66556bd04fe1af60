use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidSize { width, height });
        }
        let capacity = mult(width, height);
        if mines > capacity {
            return Err(FieldError::TooManyMines {
                requested: mines,
                capacity,
            });
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            mines: 10,
        }
    }
}

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a reveal: the cells that were opened, for the caller to draw,
/// and the state the game is in afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealOutcome {
    pub revealed: Vec<Coord2>,
    pub state: SessionState,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged => true,
            Self::Unflagged => true,
        }
    }
}

/// One game from first move to win or loss, driven by a controller one input
/// at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    seed: Option<u64>,
    field: Field,
    flagged_count: CellCount,
    state: SessionState,
}

impl Session {
    /// Starts a game on a freshly mined field.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let (field, seed) = Self::mined_field(&config, seed)?;
        Ok(Self {
            config,
            seed: Some(seed),
            field,
            flagged_count: 0,
            state: SessionState::Playing,
        })
    }

    /// Starts a game on a field prepared by the caller, mines already planted.
    ///
    /// A field with a revealed mine starts out lost, a cleared one won.
    pub fn from_field(field: Field) -> Self {
        let (width, height) = field.size();
        let config = GameConfig {
            width,
            height,
            mines: field.mine_count(),
        };
        let flagged_count = field
            .cells()
            .filter(|cell| cell.has_flag())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        let state = if field.cells().any(|cell| cell.has_mine() && cell.is_revealed()) {
            SessionState::Lost
        } else if field.is_cleared() {
            SessionState::Won
        } else {
            SessionState::Playing
        };
        Self {
            config,
            seed: None,
            field,
            flagged_count,
            state,
        }
    }

    fn mined_field(config: &GameConfig, seed: Option<u64>) -> Result<(Field, u64)> {
        let mut field = Field::new(config.width, config.height)?;
        let seed = field.plant_random_mines(config.mines, seed)?;
        Ok((field, seed))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Seed the mines were planted with, `None` for caller-prepared fields.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// Throws the current field away and starts over with the same config.
    pub fn restart(&mut self, seed: Option<u64>) -> Result<u64> {
        let (field, seed) = Self::mined_field(&self.config, seed)?;
        self.field = field;
        self.seed = Some(seed);
        self.flagged_count = 0;
        self.state = SessionState::Playing;
        log::debug!("Restarted with seed {}", seed);
        Ok(seed)
    }

    /// Reveals a cell, flooding through zero hints. Revealing a mine loses the
    /// game, otherwise the game is won once only flagged mines stay closed.
    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<RevealOutcome> {
        self.field.validate_coords((x, y))?;
        self.check_playing()?;

        // a flag on the clicked cell goes away with the reveal
        if self.field[(x, y)].has_flag() {
            self.flagged_count -= 1;
        }
        let revealed = self.field.reveal(x, y)?;

        if self.field[(x, y)].has_mine() {
            self.end_game(false);
        } else if self.field.is_cleared() {
            self.end_game(true);
        }

        Ok(RevealOutcome {
            revealed,
            state: self.state,
        })
    }

    /// Flags a hidden cell or takes the flag off again. Revealed cells are left
    /// alone. Flagging the last mine wins the game.
    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<FlagOutcome> {
        let coords = self.field.validate_coords((x, y))?;
        self.check_playing()?;

        let cell = &mut self.field[coords];
        Ok(match cell.status() {
            CellStatus::Hidden => {
                cell.set_flag();
                self.flagged_count += 1;
                if self.field.is_cleared() {
                    self.end_game(true);
                }
                FlagOutcome::Flagged
            }
            CellStatus::Flagged => {
                cell.remove_flag();
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            CellStatus::Revealed => FlagOutcome::NoChange,
        })
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(FieldError::GameOver)
        } else {
            Ok(())
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::debug!("Game ended: {:?}", self.state);
    }
}
