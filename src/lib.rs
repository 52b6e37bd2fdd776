//! snekgrid - the simulation core of a grid snake game
//!
//! The crate is split leaf-first:
//! - grid and snake types (`grid`, `snake`)
//! - collision detection and food placement (`collision`, `food`)
//! - the per-tick movement rules (`engine`)
//! - speed presets and the pre-game menu (`difficulty`, `menu`)
//! - the top-level state machine driven by an external scheduler (`game`)
//!
//! Nothing in here draws, sleeps, or reads the keyboard. Those are left to
//! whoever drives [`GameController`].

pub mod collision;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod food;
pub mod game;
pub mod grid;
pub mod menu;
pub mod snake;

pub use collision::{detect, Collision};
pub use config::{ConfigError, GameConfig};
pub use difficulty::{Difficulty, DifficultyClock, DifficultyTable};
pub use engine::{Board, MovementEngine, StepOutcome};
pub use food::{FoodError, FoodManager};
pub use game::{Action, EndReason, GameController, GamePhase, Schedule, Snapshot};
pub use grid::{Grid, Position};
pub use menu::{FoodCount, MenuController, MenuEvent, MenuSelection};
pub use snake::{apply_direction, Snake, Velocity};
