use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snekgrid::{
    Action, Board, Difficulty, EndReason, FoodCount, FoodManager, GameConfig, GameController,
    GamePhase, Grid, MovementEngine, Position, Snake, StepOutcome, Velocity,
};

fn start(seed: u64, food_count: FoodCount) -> GameController {
    let mut game = GameController::from_seed(GameConfig::default(), seed).unwrap();
    game.handle_action(Action::SelectFoodCount(food_count));
    game.handle_action(Action::Confirm);
    game
}

fn assert_food_invariant(game: &GameController, expected: usize) {
    let board = game.board();
    let foods = board.food.cells();
    let distinct: HashSet<_> = foods.iter().collect();

    assert_eq!(foods.len(), expected);
    assert_eq!(distinct.len(), expected);
    assert!(foods.iter().all(|p| !board.snake.contains(*p)));
    assert!(foods.iter().all(|p| game.config().grid().contains(*p)));
}

#[test]
fn menu_confirm_uses_defaults() {
    let mut game = GameController::from_seed(GameConfig::default(), 1).unwrap();
    assert_eq!(game.phase(), GamePhase::Menu);

    let schedule = game.handle_action(Action::Confirm).unwrap();

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(schedule.delay, Duration::from_millis(80));
    assert_eq!(game.snapshot().foods.len(), 1);
    assert_eq!(game.snapshot().snake, vec![Position::new(5, 5)]);
}

#[test]
fn idle_ticks_change_nothing() {
    let mut game = start(2, FoodCount::Three);
    let before = game.snapshot();

    for _ in 0..20 {
        assert!(game.tick().is_some());
    }

    assert_eq!(game.snapshot(), before);
}

#[test]
fn walking_into_the_left_wall() {
    let mut game = start(3, FoodCount::One);
    game.handle_action(Action::MoveLeft);

    // (5,5) -> (0,5) takes five ticks whatever gets eaten on the way.
    for _ in 0..5 {
        assert!(game.tick().is_some());
    }
    assert_eq!(game.board().snake.head(), Position::new(0, 5));

    let frozen = game.snapshot();
    assert_eq!(game.tick(), None);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.end_reason(), Some(EndReason::Wall));
    assert_eq!(game.snapshot().snake, frozen.snake);
}

#[test]
fn length_and_food_invariants_hold_under_random_play() {
    let mut steer = StdRng::seed_from_u64(99);
    let moves = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
    ];

    for seed in 0..20 {
        let mut game = start(seed, FoodCount::Three);
        assert_food_invariant(&game, 3);

        for _ in 0..200 {
            game.handle_action(moves[steer.gen_range(0..moves.len())]);
            let len_before = game.board().snake.len();
            let score_before = game.score();

            if game.tick().is_none() {
                assert_eq!(game.phase(), GamePhase::GameOver);
                assert_eq!(game.board().snake.len(), len_before);
                break;
            }

            let ate = game.score() - score_before;
            assert!(ate <= 1);
            assert_eq!(game.board().snake.len(), len_before + ate as usize);
            assert_food_invariant(&game, 3);

            let cells: HashSet<_> = game.board().snake.cells().collect();
            assert_eq!(cells.len(), game.board().snake.len());
        }
    }
}

#[test]
fn eating_scenario_on_default_grid() {
    let grid = Grid::new(25, 25);
    let engine = MovementEngine::new(grid);
    let mut rng = StdRng::seed_from_u64(12);
    let mut board = Board::new(
        Snake::with_body(Position::new(6, 5), [Position::new(5, 5)]),
        FoodManager::with_cells(grid, [Position::new(7, 5)]),
    );

    assert_eq!(engine.step(&mut board, Velocity::Right, &mut rng), StepOutcome::Grew);
    assert_eq!(board.snake.head(), Position::new(7, 5));
    assert_eq!(board.score, 1);
    assert_eq!(board.snake.len(), 3);
    assert_eq!(board.food.len(), 1);
    assert!(!board.snake.contains(board.food.cells()[0]));
}

#[test]
fn same_seed_same_game() {
    let script = [
        Action::MoveRight,
        Action::MoveDown,
        Action::MoveRight,
        Action::MoveUp,
    ];
    let run = |seed| {
        let mut game = start(seed, FoodCount::Two);
        let mut frames = Vec::new();
        for action in script.iter().cycle().take(40) {
            game.handle_action(*action);
            game.tick();
            frames.push(game.snapshot());
        }
        frames
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn restart_keeps_selection_and_invalidates_schedule() {
    let mut game = GameController::from_seed(GameConfig::default(), 5).unwrap();
    game.handle_action(Action::SelectDifficulty(Difficulty::Hard));
    game.handle_action(Action::SelectFoodCount(FoodCount::Two));
    let first = game.handle_action(Action::Confirm).unwrap();

    game.handle_action(Action::MoveUp);
    while game.tick().is_some() {}
    assert_eq!(game.end_reason(), Some(EndReason::Wall));

    let second = game.handle_action(Action::Restart).unwrap();
    assert_eq!(second.delay, Duration::from_millis(55));
    assert_ne!(second.generation, first.generation);
    assert_eq!(game.generation(), second.generation);
    assert_eq!(game.score(), 0);
    assert_eq!(game.velocity(), Velocity::None);
    assert_food_invariant(&game, 2);

    game.handle_action(Action::MoveUp);
    while game.tick().is_some() {}
    game.handle_action(Action::ReturnToMenu);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert_eq!(snapshot.selection.difficulty, Some(Difficulty::Hard));
    assert_eq!(snapshot.selection.food_count, FoodCount::Two);
}
