use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::Collision;
use crate::config::{ConfigError, GameConfig};
use crate::difficulty::{Difficulty, DifficultyClock};
use crate::engine::{Board, MovementEngine, StepOutcome};
use crate::food::FoodManager;
use crate::grid::Position;
use crate::menu::{FoodCount, MenuController, MenuEvent, MenuOutcome, MenuSelection};
use crate::snake::{apply_direction, Snake, Velocity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
}

/// Why the last game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// Every cell is covered; there is nowhere left to put food.
    BoardFull,
}

impl From<Collision> for EndReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Wall => EndReason::Wall,
            Collision::SelfHit => EndReason::SelfCollision,
        }
    }
}

/// Semantic input, already mapped from whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SelectDifficulty(Difficulty),
    SelectFoodCount(FoodCount),
    Confirm,
    Restart,
    ReturnToMenu,
}

impl Action {
    pub fn direction(self) -> Option<Velocity> {
        match self {
            Action::MoveUp => Some(Velocity::Up),
            Action::MoveDown => Some(Velocity::Down),
            Action::MoveLeft => Some(Velocity::Left),
            Action::MoveRight => Some(Velocity::Right),
            _ => None,
        }
    }
}

/// A request to call [`GameController::tick`] again after `delay`.
///
/// `generation` changes on every reset and on leaving for the menu; a
/// request whose generation no longer matches
/// [`GameController::generation`] is stale and should be dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub delay: Duration,
    pub generation: u64,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Head first. Empty in the menu.
    pub snake: Vec<Position>,
    pub foods: Vec<Position>,
    pub score: u32,
    pub best_score: u32,
    pub selection: MenuSelection,
    pub end_reason: Option<EndReason>,
}

/// Top-level state machine: Menu, Playing, GameOver.
///
/// Owns the board, the menu selection and the random source. It never
/// sleeps; the caller drives it with [`GameController::tick`] and
/// [`GameController::handle_action`].
pub struct GameController<R = StdRng> {
    config: GameConfig,
    engine: MovementEngine,
    clock: DifficultyClock,
    menu: MenuController,
    phase: GamePhase,
    board: Board,
    velocity: Velocity,
    end_reason: Option<EndReason>,
    best_score: u32,
    generation: u64,
    rng: R,
}

impl GameController<StdRng> {
    /// Reproducible food placement for a given seed.
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameController<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid();

        Ok(Self {
            config,
            engine: MovementEngine::new(grid),
            clock: DifficultyClock::new(config.intervals),
            menu: MenuController::new(),
            phase: GamePhase::Menu,
            board: Board::new(Snake::new(config.start), FoodManager::new(grid)),
            velocity: Velocity::None,
            end_reason: None,
            best_score: 0,
            generation: 0,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn selection(&self) -> MenuSelection {
        self.menu.selection()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current tick interval.
    pub fn interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Applies one input between ticks.
    ///
    /// Returns a fresh [`Schedule`] when the action started a game; any
    /// earlier request is stale from then on. Actions that mean nothing
    /// in the current phase are ignored.
    pub fn handle_action(&mut self, action: Action) -> Option<Schedule> {
        match (self.phase, action) {
            (GamePhase::Menu, Action::SelectDifficulty(difficulty)) => {
                self.menu.handle(MenuEvent::SelectDifficulty(difficulty));
                None
            }
            (GamePhase::Menu, Action::SelectFoodCount(count)) => {
                self.menu.handle(MenuEvent::SelectFoodCount(count));
                None
            }
            (GamePhase::Menu, Action::Confirm) => match self.menu.handle(MenuEvent::Confirm) {
                MenuOutcome::Confirmed(selection) => Some(self.reset(selection)),
                MenuOutcome::Updated => None,
            },
            (GamePhase::Playing, Action::MoveUp | Action::MoveDown)
            | (GamePhase::Playing, Action::MoveLeft | Action::MoveRight) => {
                if let Some(requested) = action.direction() {
                    self.velocity = apply_direction(requested, self.velocity);
                }
                None
            }
            (GamePhase::GameOver, Action::Restart) => Some(self.reset(self.menu.selection())),
            (GamePhase::GameOver, Action::ReturnToMenu) => {
                self.phase = GamePhase::Menu;
                self.generation += 1;
                info!("Back to menu, {}", self.menu.selection());
                None
            }
            (phase, action) => {
                debug!("Ignoring {:?} in {:?}", action, phase);
                None
            }
        }
    }

    /// Runs one simulation step.
    ///
    /// Returns when to tick next, or `None` once there is nothing left to
    /// tick (menu or game over).
    pub fn tick(&mut self) -> Option<Schedule> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        match self
            .engine
            .step(&mut self.board, self.velocity, &mut self.rng)
        {
            StepOutcome::Idle | StepOutcome::Moved => {}
            StepOutcome::Grew => self.best_score = self.best_score.max(self.board.score),
            StepOutcome::BoardFull => {
                self.best_score = self.best_score.max(self.board.score);
                self.finish(EndReason::BoardFull);
            }
            StepOutcome::Collided(collision) => self.finish(collision.into()),
        }

        (self.phase == GamePhase::Playing).then(|| self.schedule())
    }

    pub fn snapshot(&self) -> Snapshot {
        let (snake, foods) = match self.phase {
            GamePhase::Menu => (Vec::new(), Vec::new()),
            GamePhase::Playing | GamePhase::GameOver => (
                self.board.snake.cells().collect(),
                self.board.food.cells().to_vec(),
            ),
        };

        Snapshot {
            phase: self.phase,
            snake,
            foods,
            score: self.board.score,
            best_score: self.best_score,
            selection: self.menu.selection(),
            end_reason: self.end_reason,
        }
    }

    fn schedule(&self) -> Schedule {
        Schedule {
            delay: self.clock.interval(),
            generation: self.generation,
        }
    }

    fn reset(&mut self, selection: MenuSelection) -> Schedule {
        self.clock.select(selection.difficulty);
        self.generation += 1;
        self.velocity = Velocity::None;
        self.end_reason = None;

        let mut board = Board::new(
            Snake::new(self.config.start),
            FoodManager::new(self.config.grid()),
        );
        let occupied = board.occupied();
        let spawned = board
            .food
            .spawn_all(selection.food_count.get(), &occupied, &mut self.rng);
        self.board = board;

        match spawned {
            Ok(()) => {
                self.phase = GamePhase::Playing;
                info!(
                    "Game started: {}, interval {:?}",
                    selection,
                    self.clock.interval()
                );
            }
            Err(err) => {
                warn!("Could not lay out food: {}", err);
                self.finish(EndReason::BoardFull);
            }
        }

        self.schedule()
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        info!(
            "Game over ({:?}), score {}, best {}",
            reason, self.board.score, self.best_score
        );
    }
}
