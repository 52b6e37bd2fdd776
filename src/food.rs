use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::grid::{Grid, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoodError {
    /// No free cell was left for another food.
    #[error("board full: placed {placed} of {requested} food cells")]
    BoardFull { placed: usize, requested: usize },
    #[error("no food at ({}, {})", .0.col, .0.row)]
    NotFood(Position),
}

/// Keeps the food cells mutually distinct and clear of anything the caller
/// marks as occupied.
#[derive(Debug, Clone)]
pub struct FoodManager {
    grid: Grid,
    cells: Vec<Position>,
}

impl FoodManager {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: Vec::new(),
        }
    }

    /// Starts from a fixed layout. Duplicates are dropped.
    pub fn with_cells(grid: Grid, cells: impl IntoIterator<Item = Position>) -> Self {
        let mut manager = Self::new(grid);
        for pos in cells {
            if !manager.cells.contains(&pos) {
                manager.cells.push(pos);
            }
        }
        manager
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Replaces the current set with `count` fresh cells, none of them in
    /// `occupied` or on each other.
    pub fn spawn_all<R: Rng>(
        &mut self,
        count: usize,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<(), FoodError> {
        self.cells.clear();
        let mut excluded = occupied.clone();

        for _ in 0..count {
            let Some(pos) = self.grid.random_empty_cell(&excluded, rng) else {
                warn!("Only {} of {} food cells fit on the board", self.cells.len(), count);
                return Err(FoodError::BoardFull {
                    placed: self.cells.len(),
                    requested: count,
                });
            };
            excluded.insert(pos);
            self.cells.push(pos);
        }

        debug!("Spawned food at {:?}", self.cells);
        Ok(())
    }

    /// Removes `eaten` and puts exactly one new cell somewhere outside
    /// `occupied` and the remaining food. Returns the new cell.
    ///
    /// On [`FoodError::BoardFull`] the eaten cell is still removed, leaving
    /// one food fewer.
    pub fn replace<R: Rng>(
        &mut self,
        eaten: Position,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, FoodError> {
        let index = self
            .cells
            .iter()
            .position(|&pos| pos == eaten)
            .ok_or(FoodError::NotFood(eaten))?;
        self.cells.remove(index);

        let mut excluded = occupied.clone();
        excluded.extend(self.cells.iter().copied());

        match self.grid.random_empty_cell(&excluded, rng) {
            Some(pos) => {
                debug!("Food at {:?} eaten, respawned at {:?}", eaten, pos);
                self.cells.push(pos);
                Ok(pos)
            }
            None => {
                warn!("No room to respawn food eaten at {:?}", eaten);
                Err(FoodError::BoardFull {
                    placed: self.cells.len(),
                    requested: self.cells.len() + 1,
                })
            }
        }
    }
}
