use log::info;
use thiserror::Error;

use crate::difficulty::{Difficulty, DifficultyTable};
use crate::grid::{Grid, Position};
use crate::menu::FoodCount;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row")]
    EmptyGrid,
    #[error("start cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    StartOutOfBounds { col: i32, row: i32, cols: u16, rows: u16 },
    #[error("grid holds {capacity} cells but a game needs more than {required}")]
    TooSmall { capacity: usize, required: usize },
    #[error("{0} interval must be non-zero")]
    ZeroInterval(Difficulty),
}

/// Fixed settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: u16,
    pub rows: u16,
    /// Where every new snake starts.
    pub start: Position,
    pub intervals: DifficultyTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 25,
            rows: 25,
            start: Position::new(5, 5),
            intervals: DifficultyTable::default(),
        }
    }
}

impl GameConfig {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }

    /// Rejects settings under which food could not be placed at the start of
    /// a game, or the scheduler would spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let grid = self.grid();
        if !grid.contains(self.start) {
            return Err(ConfigError::StartOutOfBounds {
                col: self.start.col,
                row: self.start.row,
                cols: self.cols,
                rows: self.rows,
            });
        }

        // Starting snake plus the largest food set, with room left to move.
        let required = 1 + FoodCount::MAX;
        if grid.capacity() <= required {
            return Err(ConfigError::TooSmall {
                capacity: grid.capacity(),
                required,
            });
        }

        if let Some(difficulty) = Difficulty::ALL
            .into_iter()
            .find(|d| self.intervals.millis(*d) == 0)
        {
            return Err(ConfigError::ZeroInterval(difficulty));
        }

        info!(
            "Config: {}x{} grid, start {:?}, intervals {:?}",
            self.cols, self.rows, self.start, self.intervals
        );
        Ok(())
    }
}
