#![allow(dead_code)]

use std::time::Duration;

use candysnek::{
    Cue, Difficulty, Direction, GameConfig, GameController, Point, Snake, Status, View,
};

/// Remembers the latest scene and every status and cue it was sent.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub scenes: usize,
    pub snake: Vec<Point>,
    pub alive: bool,
    pub direction: Option<Direction>,
    pub candies: Vec<(Point, u32)>,
    pub score: (u32, u32, u32, u32),
    pub statuses: Vec<Status>,
    pub cues: Vec<Cue>,
}

impl RecordingView {
    pub fn status(&self) -> Status {
        self.statuses.last().copied().unwrap_or_default()
    }
}

impl View for RecordingView {
    fn clear(&mut self) {
        self.scenes += 1;
        self.candies.clear();
    }

    fn draw_snake(&mut self, body: &[Point], alive: bool, direction: Direction) {
        self.snake = body.to_vec();
        self.alive = alive;
        self.direction = Some(direction);
    }

    fn draw_candy(&mut self, position: Point, value: u32) {
        self.candies.push((position, value));
    }

    fn draw_score(&mut self, score: u32, high_score: u32, target: u32, count: u32) {
        self.score = (score, high_score, target, count);
    }

    fn set_status(&mut self, status: Status) {
        self.statuses.push(status);
    }

    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

pub fn config() -> GameConfig {
    GameConfig {
        grid_width: 10,
        grid_height: 10,
        frame_interval_ms: 100,
        difficulty: Difficulty::Easy,
        collision_tolerance: 1,
        initial_growth: 0,
        ..GameConfig::default()
    }
}

pub fn game_with(config: GameConfig) -> GameController<RecordingView> {
    GameController::with_seed(config, RecordingView::default(), 42).unwrap()
}

pub fn game() -> GameController<RecordingView> {
    game_with(config())
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Head at (1,1) facing up, wrapped in its own body. Only the tail cell
/// (1,0) straight ahead can ever be free.
pub fn boxed_snake(growth: u32) -> Snake {
    Snake::from_segments(
        [
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
            Point::new(0, 1),
            Point::new(0, 0),
            Point::new(1, 0),
        ],
        Direction::Up,
        growth,
    )
    .unwrap()
}
