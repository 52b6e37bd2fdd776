use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use simplelog::{Config, WriteLogger};
use snekgrid::{
    Action, Difficulty, EndReason, FoodCount, GameConfig, GameController, GamePhase, Snapshot,
};

/// Poll timeout while nothing is scheduled (menu, game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "snekgrid")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Grid columns
    #[arg(long, default_value = "25")]
    cols: u16,

    /// Grid rows
    #[arg(long, default_value = "25")]
    rows: u16,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is taken by the game
    #[arg(long, default_value = "snekgrid.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("unknown log level `{}`", level))
}

/// What a key press means to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Game(Action),
    Quit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    WriteLogger::init(
        cli.log_level,
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create {}", cli.log_file.display()))?,
    )
    .context("Failed to initialize logger")?;

    info!("Starting snekgrid");

    let config = GameConfig::new(cli.cols, cli.rows);
    let mut game = match cli.seed {
        Some(seed) => GameController::from_seed(config, seed),
        None => GameController::from_entropy(config),
    }
    .context("Invalid game configuration")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, &mut game);

    // Cleanup terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Exiting, best score {}", game.best_score());
    result
}

/// Scheduler loop: waits for input until the next tick is due, then ticks.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, game: &mut GameController) -> Result<()> {
    // (deadline, generation) of the pending tick, if any
    let mut next_tick: Option<(Instant, u64)> = None;

    loop {
        let snapshot = game.snapshot();
        terminal
            .draw(|frame| render(frame, &snapshot))
            .context("Failed to draw frame")?;

        let timeout = next_tick
            .map(|(at, _)| at.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(Command::Quit) => break,
                    Some(Command::Game(action)) => {
                        if let Some(schedule) = game.handle_action(action) {
                            next_tick =
                                Some((Instant::now() + schedule.delay, schedule.generation));
                        }
                    }
                    None => {}
                }
            }
        }

        if let Some((at, generation)) = next_tick {
            if generation != game.generation() {
                next_tick = None;
            } else if Instant::now() >= at {
                next_tick = game
                    .tick()
                    .map(|schedule| (Instant::now() + schedule.delay, schedule.generation));
            }
        }
    }

    Ok(())
}

fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('w') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('s') => Action::MoveDown,
        KeyCode::Left | KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Action::MoveRight,
        KeyCode::Char(c @ '1'..='4') => {
            Action::SelectDifficulty(Difficulty::from_index(c as u8 - b'0')?)
        }
        KeyCode::Char('f') => Action::SelectFoodCount(FoodCount::One),
        KeyCode::Char('g') => Action::SelectFoodCount(FoodCount::Two),
        KeyCode::Char('h') => Action::SelectFoodCount(FoodCount::Three),
        KeyCode::Enter => Action::Confirm,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('m') => Action::ReturnToMenu,
        _ => return None,
    };
    Some(Command::Game(action))
}

fn render(frame: &mut Frame, snapshot: &Snapshot) {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score line
            Constraint::Min(0),    // Board or menu
        ])
        .split(frame.area());

    let status = match snapshot.phase {
        GamePhase::Menu => format!("SNAKE    Best: {}", snapshot.best_score),
        _ => format!(
            "SNAKE    Score: {}    Best: {}",
            snapshot.score, snapshot.best_score
        ),
    };
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    match snapshot.phase {
        GamePhase::Menu => render_menu(frame, snapshot, layout[1]),
        GamePhase::Playing => {
            let block = Block::default().title("Playing").borders(Borders::ALL);
            let inner = block.inner(layout[1]);
            frame.render_widget(block, layout[1]);
            frame.render_widget(BoardView(snapshot), inner);
        }
        GamePhase::GameOver => {
            let block = Block::default().title("Game over").borders(Borders::ALL);
            let inner = block.inner(layout[1]);
            frame.render_widget(block, layout[1]);
            frame.render_widget(BoardView(snapshot), inner);

            let reason = match snapshot.end_reason {
                Some(EndReason::BoardFull) => "BOARD CLEARED",
                _ => "GAME OVER",
            };
            let text = format!(
                "{}\nFinal Score: {}\nPress R to restart\nPress M for menu",
                reason, snapshot.score
            );
            let popup = centered(inner, 24, 6);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                popup,
            );
        }
    }
}

fn render_menu(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut lines = vec![
        Line::from("SNAKE".bold()),
        Line::from(""),
        Line::from("Choose difficulty:"),
    ];
    lines.extend(
        Difficulty::ALL
            .iter()
            .map(|d| Line::from(format!("{} = {}", d.index(), d.label()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from("Choose number of foods:"));
    lines.extend(
        FoodCount::ALL
            .iter()
            .zip(['F', 'G', 'H'])
            .map(|(count, key)| Line::from(format!("{} = {} food", key, count.get()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from("Pick both, then press Enter to start"));
    lines.push(Line::from(""));
    lines.push(Line::from(snapshot.selection.to_string()));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws the grid two terminal columns per cell so it looks square.
struct BoardView<'a>(&'a Snapshot);

impl BoardView<'_> {
    fn cell(area: Rect, col: i32, row: i32) -> Option<(u16, u16)> {
        let x = u16::try_from(col).ok()?.checked_mul(2)?.checked_add(area.x)?;
        let y = u16::try_from(row).ok()?.checked_add(area.y)?;
        (x < area.right().saturating_sub(1) && y < area.bottom()).then_some((x, y))
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.0;

        for pos in snapshot.foods.iter() {
            if let Some((x, y)) = Self::cell(area, pos.col, pos.row) {
                buf[(x, y)].set_symbol("●").set_fg(Color::Red);
            }
        }

        for pos in snapshot.snake.iter().skip(1) {
            if let Some((x, y)) = Self::cell(area, pos.col, pos.row) {
                buf[(x, y)].set_symbol(" ").set_bg(Color::Green);
                buf[(x + 1, y)].set_symbol(" ").set_bg(Color::Green);
            }
        }

        if let Some(head) = snapshot.snake.first() {
            if let Some((x, y)) = Self::cell(area, head.col, head.row) {
                buf[(x, y)].set_symbol(" ").set_bg(Color::LightGreen);
                buf[(x + 1, y)].set_symbol(" ").set_bg(Color::LightGreen);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_original_key_layout() {
        assert_eq!(
            map_key(press(KeyCode::Char('3'))),
            Some(Command::Game(Action::SelectDifficulty(Difficulty::Hard)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('g'))),
            Some(Command::Game(Action::SelectFoodCount(FoodCount::Two)))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter)),
            Some(Command::Game(Action::Confirm))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('r'))),
            Some(Command::Game(Action::Restart))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('m'))),
            Some(Command::Game(Action::ReturnToMenu))
        );
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(Command::Game(Action::MoveLeft))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(Command::Game(Action::MoveUp))
        );
    }

    #[test]
    fn test_quit_and_unmapped_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('5'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_board_cells_clip_to_area() {
        let area = Rect::new(1, 1, 10, 4);
        assert_eq!(BoardView::cell(area, 0, 0), Some((1, 1)));
        assert_eq!(BoardView::cell(area, 4, 3), Some((9, 4)));
        assert_eq!(BoardView::cell(area, 5, 0), None);
        assert_eq!(BoardView::cell(area, 0, 4), None);
        assert_eq!(BoardView::cell(area, -1, 0), None);
    }
}
