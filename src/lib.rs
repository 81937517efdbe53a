//! Snake with sums: every round deals numbered candies and the snake has to
//! eat a set that adds up to the round target, no more and no less.
//!
//! The crate is the game core. [`GameController`] runs the phases and timers,
//! [`RoundEngine`] moves the snake and keeps score, and everything visible
//! goes through the [`View`] trait. Time only moves when the host calls
//! [`GameController::advance`], so the whole game can be driven from tests.

pub mod candy;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod schedule;
pub mod snake;
pub mod terminal;
pub mod view;

pub use candy::{compose, place_candy, Arity, Candy, CandyKind};
pub use config::{Appearance, Difficulty, GameConfig};
pub use direction::Direction;
pub use engine::{FrameReport, Motion, RoundEngine, RoundOutcome, RoundState};
pub use error::{ComposeError, ConfigError, GameError, PlacementError};
pub use game::{GameController, Phase, TimerEvent};
pub use grid::{Grid, Point};
pub use schedule::Timeline;
pub use snake::Snake;
pub use view::{Cue, InputLatch, Status, View};
