//! What the game needs from the outside world: something that draws and
//! plays sounds, and something that remembers the last steering input.

use crate::direction::Direction;
use crate::grid::Point;

/// Mood shown next to the score after a round is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Neutral,
    Happy,
    Sad,
}

/// Advisory sound cues. A view may ignore any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Turn,
    Eat,
    RoundWon,
    RoundLost,
    GameOver,
}

/// Rendering collaborator. Calls for one scene arrive as `clear`, one
/// `draw_snake`, a `draw_candy` per active candy, then `draw_score`.
pub trait View {
    fn clear(&mut self);

    fn draw_snake(&mut self, body: &[Point], alive: bool, direction: Direction);

    fn draw_candy(&mut self, position: Point, value: u32);

    fn draw_score(&mut self, score: u32, high_score: u32, target: u32, count: u32);

    fn set_status(&mut self, status: Status);

    fn play(&mut self, _cue: Cue) {}
}

/// Holds the most recent direction the player asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputLatch {
    last: Option<Direction>,
}

impl InputLatch {
    pub fn latch(&mut self, direction: Direction) {
        self.last = Some(direction);
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
