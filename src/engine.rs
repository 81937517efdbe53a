use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::candy::{self, Arity, Candy};
use crate::config::GameConfig;
use crate::direction::Direction;
use crate::error::{PlacementError, Result};
use crate::grid::{Grid, Point};
use crate::snake::Snake;

/// Points awarded for hitting the target exactly.
pub const WIN_BONUS: u32 = 10;
/// Points taken for overshooting the target.
pub const LOSS_PENALTY: u32 = 5;

/// Extra points for finishing a round quickly.
pub fn time_bonus(elapsed: Duration) -> u32 {
    match elapsed.as_millis() {
        0..=9_999 => 3,
        10_000..=19_999 => 2,
        20_000..=29_999 => 1,
        _ => 0,
    }
}

/// Bookkeeping for the round in progress plus the scores that outlive it.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub count: u32,
    pub target: u32,
    pub score: u32,
    pub high_score: u32,
    pub started_at: Duration,
    pub candies: Vec<Candy>,
    /// Set once the round is won or lost, until the next reset.
    pub outcome: Option<RoundOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won { bonus: u32 },
    Lost { penalty: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// The head advanced.
    Moved,
    /// The move was blocked but the tolerance absorbed it.
    Held { frames_left: u32 },
    /// The move was blocked with no tolerance left.
    Died,
}

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub motion: Motion,
    /// The committed move changed the snake's heading.
    pub turned: bool,
    pub eaten: Vec<Candy>,
    pub outcome: Option<RoundOutcome>,
}

impl FrameReport {
    fn blocked(motion: Motion) -> Self {
        Self {
            motion,
            turned: false,
            eaten: Vec::new(),
            outcome: None,
        }
    }
}

/// Owns the playfield and scoring, advancing one frame at a time.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    grid: Grid,
    snake: Snake,
    round: RoundState,
    arity: Arity,
    collision_tolerance: u32,
    collision_frames_left: u32,
    initial_growth: u32,
    placement_attempts: u32,
    rng: StdRng,
}

impl RoundEngine {
    /// Starts a game: a one-segment snake on a random cell and a first round at `now`.
    pub fn new(config: &GameConfig, mut rng: StdRng, now: Duration) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;
        let snake = Snake::new(
            grid.random_point(&mut rng),
            Direction::default(),
            config.initial_growth,
        );

        let mut engine = Self {
            grid,
            snake,
            round: RoundState {
                count: 0,
                target: config.target(),
                score: 0,
                high_score: 0,
                started_at: now,
                candies: Vec::new(),
                outcome: None,
            },
            arity: config.arity(),
            collision_tolerance: config.collision_tolerance,
            collision_frames_left: config.collision_tolerance,
            initial_growth: config.initial_growth,
            placement_attempts: config.placement_attempts,
            rng,
        };
        engine.reset_round(now)?;
        Ok(engine)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn candies(&self) -> &[Candy] {
        &self.round.candies
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn high_score(&self) -> u32 {
        self.round.high_score
    }

    pub fn collision_frames_left(&self) -> u32 {
        self.collision_frames_left
    }

    /// Replaces the snake, e.g. to stage a position.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Replaces the active candies without touching the round's count or timer.
    pub fn set_candies(&mut self, candies: Vec<Candy>) {
        self.round.candies = candies;
    }

    pub fn set_score(&mut self, score: u32) {
        self.round.score = score;
    }

    /// Advances one frame, steering toward `desired` (the default heading when `None`).
    pub fn step_frame(&mut self, desired: Option<Direction>, now: Duration) -> FrameReport {
        let direction = self
            .snake
            .resolve_direction(desired.unwrap_or_default());

        let raw = self.snake.next_head(direction);
        let new_head = if self.grid.contains(raw) {
            raw
        } else {
            self.grid.wrap(raw)
        };

        if self.snake.collides_with(new_head, true) {
            if self.collision_frames_left > 0 {
                self.collision_frames_left -= 1;
                debug!(frames_left = self.collision_frames_left, "move blocked");
                return FrameReport::blocked(Motion::Held {
                    frames_left: self.collision_frames_left,
                });
            }
            self.snake.kill();
            info!(score = self.round.score, len = self.snake.len(), "snake died");
            return FrameReport::blocked(Motion::Died);
        }

        let turned = direction != self.snake.direction();
        self.snake.apply_move(new_head, direction);
        self.collision_frames_left = self.collision_tolerance;
        if turned {
            debug!(?direction, "turned");
        }

        let eaten = self.consume_at(new_head);
        let outcome = if eaten.is_empty() {
            None
        } else {
            self.resolve_round(now)
        };

        FrameReport {
            motion: Motion::Moved,
            turned,
            eaten,
            outcome,
        }
    }

    fn consume_at(&mut self, head: Point) -> Vec<Candy> {
        let (eaten, remaining): (Vec<Candy>, Vec<Candy>) = self
            .round
            .candies
            .drain(..)
            .partition(|candy| candy.position == head);
        self.round.candies = remaining;

        for candy in &eaten {
            self.round.count += candy.value;
            self.snake.grow(1);
            self.round.high_score = self.round.high_score.max(self.round.score);
            debug!(value = candy.value, count = self.round.count, "candy eaten");
        }
        eaten
    }

    fn resolve_round(&mut self, now: Duration) -> Option<RoundOutcome> {
        if self.round.outcome.is_some() {
            return None;
        }

        let round = &mut self.round;
        let outcome = if round.count == round.target {
            let bonus = WIN_BONUS + time_bonus(now.saturating_sub(round.started_at));
            round.score += bonus;
            RoundOutcome::Won { bonus }
        } else if round.count > round.target {
            let penalty = if round.score > 4 { LOSS_PENALTY } else { 0 };
            round.score -= penalty;
            RoundOutcome::Lost { penalty }
        } else {
            return None;
        };

        round.candies.clear();
        round.outcome = Some(outcome);
        info!(
            ?outcome,
            score = round.score,
            count = round.count,
            round_target = round.target,
            "round decided"
        );
        Some(outcome)
    }

    /// Deals two fresh candy groups for the same target and restarts the round clock.
    pub fn reset_round(&mut self, now: Duration) -> std::result::Result<(), PlacementError> {
        let mut candies = Vec::with_capacity(2 * self.arity.parts() as usize);
        for _ in 0..2 {
            for value in candy::compose(&mut self.rng, self.round.target, self.arity)? {
                candies.push(candy::place_candy(
                    &mut self.rng,
                    &self.grid,
                    &self.snake,
                    value,
                    self.placement_attempts,
                )?);
            }
        }

        self.round.candies = candies;
        self.round.count = 0;
        self.round.started_at = now;
        self.round.outcome = None;
        debug!(round_target = self.round.target, candies = ?self.round.candies, "round reset");
        Ok(())
    }

    /// Removes one tail segment of the dead snake. False once only the head remains.
    pub fn trim_tail(&mut self) -> bool {
        self.snake.trim_tail()
    }

    /// Brings the snake back after a death: score and round start over, the high score stays.
    pub fn resurrect(&mut self, now: Duration) -> std::result::Result<(), PlacementError> {
        self.round.score = 0;
        self.snake.revive(self.initial_growth);
        self.collision_frames_left = self.collision_tolerance;
        self.reset_round(now)?;
        info!(high_score = self.round.high_score, "snake resurrected");
        Ok(())
    }
}
