use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use thiserror::Error;
use tracing::{info, warn};

use candysnek::terminal::TerminalView;
use candysnek::{Direction, GameConfig, GameController, GameError, Grid, Phase};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Restores the terminal even when the loop bails out early.
struct RawTerminal;

impl RawTerminal {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, EnableFocusChange)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableFocusChange, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

enum Action {
    Steer(Direction),
    TogglePause,
    Pause,
    Resume,
    Quit,
}

pub fn run(config: GameConfig, seed: Option<u64>) -> Result<u32, AppError> {
    let grid = Grid::new(config.grid_width, config.grid_height).map_err(GameError::from)?;
    let view = TerminalView::new(&grid, &config.appearance);
    let (need_cols, need_rows) = view.size();
    let (cols, rows) = terminal::size()?;
    if cols < need_cols || rows < need_rows {
        warn!(cols, rows, need_cols, need_rows, "terminal is smaller than the playfield");
    }
    let mut game = match seed {
        Some(seed) => GameController::with_seed(config, view, seed)?,
        None => GameController::new(config, view)?,
    };

    let mut out = stdout();
    let guard = RawTerminal::enter(&mut out)?;
    let mut last_tick = Instant::now();
    let mut shown_phase = None;

    loop {
        if event::poll(POLL_INTERVAL)? {
            match action_for(event::read()?) {
                Some(Action::Steer(direction)) => game.steer(direction),
                Some(Action::TogglePause) => match game.phase() {
                    Phase::Paused => game.resume(),
                    _ => game.pause(),
                },
                Some(Action::Pause) => game.pause(),
                Some(Action::Resume) => game.resume(),
                Some(Action::Quit) => break,
                None => {}
            }
        }

        let now = Instant::now();
        game.advance(now - last_tick)?;
        last_tick = now;

        let phase = game.phase();
        if game.view_mut().take_dirty() || shown_phase != Some(phase) {
            game.view().present(&mut out, footer(phase))?;
            shown_phase = Some(phase);
        }
    }

    drop(guard);
    info!(high_score = game.high_score(), "quit");
    Ok(game.high_score())
}

fn action_for(event: Event) -> Option<Action> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Up | KeyCode::Char('w') => Some(Action::Steer(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s') => Some(Action::Steer(Direction::Down)),
            KeyCode::Left | KeyCode::Char('a') => Some(Action::Steer(Direction::Left)),
            KeyCode::Right | KeyCode::Char('d') => Some(Action::Steer(Direction::Right)),
            KeyCode::Char('p') => Some(Action::TogglePause),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Event::FocusLost => Some(Action::Pause),
        Event::FocusGained => Some(Action::Resume),
        _ => None,
    }
}

fn footer(phase: Phase) -> &'static str {
    match phase {
        Phase::Ready => "Arrow keys or WASD to start, 'q' to quit",
        Phase::Playing => "Eat candies that add up to the target! 'p' pauses",
        Phase::Paused => "Paused, 'p' to resume",
        Phase::GameOver => "Game over...",
    }
}
