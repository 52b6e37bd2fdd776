use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::collision::{detect, Collision};
use crate::food::{FoodError, FoodManager};
use crate::grid::{Grid, Position};
use crate::snake::{Snake, Velocity};

/// The mutable part of a running game.
#[derive(Debug, Clone)]
pub struct Board {
    pub snake: Snake,
    pub food: FoodManager,
    pub score: u32,
}

impl Board {
    pub fn new(snake: Snake, food: FoodManager) -> Self {
        Self {
            snake,
            food,
            score: 0,
        }
    }

    /// Snake and food cells together.
    pub fn occupied(&self) -> HashSet<Position> {
        self.snake
            .cells()
            .chain(self.food.cells().iter().copied())
            .collect()
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Velocity was `None`, nothing moved.
    Idle,
    Moved,
    /// Ate food and grew by one.
    Grew,
    /// Ate food and grew, but no free cell was left for its replacement.
    BoardFull,
    /// Hit something. The board is exactly as it was before the tick.
    Collided(Collision),
}

/// Applies the per-tick movement rules to a [`Board`].
#[derive(Debug, Clone, Copy)]
pub struct MovementEngine {
    grid: Grid,
}

impl MovementEngine {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Advances the snake one cell along `velocity`.
    ///
    /// Walls are checked before the body, and both before any food is
    /// eaten. Whether the tail is dropped is decided last.
    pub fn step<R: Rng>(&self, board: &mut Board, velocity: Velocity, rng: &mut R) -> StepOutcome {
        let Some((dx, dy)) = velocity.delta() else {
            return StepOutcome::Idle;
        };

        let new_head = board.snake.head().offset(dx, dy);
        board.snake.push_head(new_head);

        if let Some(collision) = detect(&board.snake, &self.grid) {
            board.snake.pop_head();
            info!("Collision {:?} at {:?}", collision, new_head);
            return StepOutcome::Collided(collision);
        }

        if !board.food.contains(new_head) {
            board.snake.drop_tail();
            return StepOutcome::Moved;
        }

        board.score += 1;
        debug!("Ate food at {:?}, score {}", new_head, board.score);

        let snake_cells: HashSet<Position> = board.snake.cells().collect();
        match board.food.replace(new_head, &snake_cells, rng) {
            Ok(_) => StepOutcome::Grew,
            Err(FoodError::BoardFull { .. }) => StepOutcome::BoardFull,
            Err(FoodError::NotFood(_)) => unreachable!("head was checked against the food set"),
        }
    }
}
