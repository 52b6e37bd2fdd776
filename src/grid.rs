use std::collections::HashSet;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Random draws tried before falling back to scanning the free cells.
pub const MAX_SPAWN_ATTEMPTS: usize = 1024;

/// A cell on the grid, in grid units.
///
/// Signed so a step off the edge can be represented before it is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Fixed-size playing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.col < self.cols as i32 && pos.row >= 0 && pos.row < self.rows as i32
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.cols as i32).map(move |col| Position::new(col, row)))
    }

    /// Picks a uniformly random cell that is not in `excluded`.
    ///
    /// Rejection sampling is tried first. Once [`MAX_SPAWN_ATTEMPTS`] draws
    /// have been rejected the free cells are enumerated and one is chosen
    /// directly, so a nearly full board still terminates. Returns `None`
    /// only when every cell is excluded.
    pub fn random_empty_cell(
        &self,
        excluded: &HashSet<Position>,
        rng: &mut impl Rng,
    ) -> Option<Position> {
        if self.capacity() == 0 {
            return None;
        }

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let pos = Position::new(
                rng.gen_range(0..self.cols) as i32,
                rng.gen_range(0..self.rows) as i32,
            );
            if !excluded.contains(&pos) {
                return Some(pos);
            }
        }

        debug!(
            "Rejection sampling exhausted after {} draws, scanning free cells",
            MAX_SPAWN_ATTEMPTS
        );
        let free: Vec<Position> = self.cells().filter(|pos| !excluded.contains(pos)).collect();
        free.choose(rng).copied()
    }
}
