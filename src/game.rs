use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::direction::Direction;
use crate::engine::{Motion, RoundEngine, RoundOutcome};
use crate::error::Result;
use crate::schedule::Timeline;
use crate::view::{Cue, InputLatch, Status, View};

/// Death chain delays are multiples of the frame interval.
const DEATH_PAUSE_FRAMES: u32 = 10;
const TRIM_STEPS_PER_FRAME: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Events the controller schedules on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Frame,
    RoundReset,
    TrimTail,
    Resurrect,
}

impl TimerEvent {
    fn is_death_step(&self) -> bool {
        matches!(self, TimerEvent::TrimTail | TimerEvent::Resurrect)
    }
}

/// Top-level state machine. Owns the engine, the timers and the view.
pub struct GameController<V: View> {
    config: GameConfig,
    engine: RoundEngine,
    phase: Phase,
    timeline: Timeline<TimerEvent>,
    input: InputLatch,
    view: V,
    seed: Option<u64>,
}

impl<V: View> GameController<V> {
    /// Validates `config` and starts a game seeded from OS entropy.
    pub fn new(config: GameConfig, view: V) -> Result<Self> {
        Self::build(config, view, None)
    }

    /// Like [`GameController::new`], but every random draw follows `seed`.
    pub fn with_seed(config: GameConfig, view: V, seed: u64) -> Result<Self> {
        Self::build(config, view, Some(seed))
    }

    fn build(config: GameConfig, view: V, seed: Option<u64>) -> Result<Self> {
        let timeline = Timeline::new();
        let engine = RoundEngine::new(&config, rng_for(seed), timeline.now())?;
        let mut game = Self {
            config,
            engine,
            phase: Phase::Ready,
            timeline,
            input: InputLatch::default(),
            view,
            seed,
        };
        game.draw_scene();
        Ok(game)
    }

    /// Throws away the current game and starts a fresh one in [`Phase::Ready`].
    pub fn init_game(&mut self) -> Result<()> {
        let _ = self.timeline.cancel_all();
        // A reseeded game replays the same opening.
        self.engine = RoundEngine::new(&self.config, rng_for(self.seed), self.timeline.now())?;
        self.input.clear();
        self.view.set_status(Status::Neutral);
        self.phase = Phase::Ready;
        self.draw_scene();
        info!("new game");
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    /// Mutable engine access for staging positions.
    pub fn engine_mut(&mut self) -> &mut RoundEngine {
        &mut self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn high_score(&self) -> u32 {
        self.engine.high_score()
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn timeline(&self) -> &Timeline<TimerEvent> {
        &self.timeline
    }

    /// Latches a steering input. The first one in [`Phase::Ready`] starts the game.
    pub fn steer(&mut self, direction: Direction) {
        self.input.latch(direction);
        self.start_moving();
    }

    fn start_moving(&mut self) {
        if self.phase == Phase::Ready {
            self.start_frame_clock();
            self.phase = Phase::Playing;
            info!("game started");
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            let _ = self.timeline.cancel_where(|event| *event == TimerEvent::Frame);
            self.phase = Phase::Paused;
            info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.start_frame_clock();
            self.phase = Phase::Playing;
            info!("resumed");
        }
    }

    /// Moves virtual time forward by `elapsed`, firing every timer that comes due.
    pub fn advance(&mut self, elapsed: Duration) -> Result<()> {
        let until = self.timeline.now() + elapsed;
        while let Some(event) = self.timeline.pop_due(until) {
            self.handle(event)?;
        }
        self.timeline.advance_to(until);
        Ok(())
    }

    /// Fires only the next pending timer, however far ahead it is.
    pub fn step(&mut self) -> Result<Option<TimerEvent>> {
        let Some(event) = self.timeline.pop_next() else {
            return Ok(None);
        };
        self.handle(event)?;
        Ok(Some(event))
    }

    fn handle(&mut self, event: TimerEvent) -> Result<()> {
        debug!(?event, now = ?self.timeline.now(), "timer fired");
        match event {
            TimerEvent::Frame => self.next_frame(),
            TimerEvent::RoundReset => {
                self.view.set_status(Status::Neutral);
                self.engine.reset_round(self.timeline.now())?;
                self.draw_scene();
            }
            TimerEvent::TrimTail => {
                if self.engine.trim_tail() {
                    self.draw_scene();
                    self.timeline.schedule(self.trim_interval(), TimerEvent::TrimTail);
                } else {
                    self.timeline.schedule(self.death_pause(), TimerEvent::Resurrect);
                }
            }
            TimerEvent::Resurrect => {
                self.engine.resurrect(self.timeline.now())?;
                // Dying cancels any pending RoundReset, which would have cleared the face.
                self.view.set_status(Status::Neutral);
                self.phase = Phase::Ready;
                self.draw_scene();
            }
        }
        Ok(())
    }

    fn next_frame(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        let report = self
            .engine
            .step_frame(self.input.last_direction(), self.timeline.now());

        match report.motion {
            Motion::Held { .. } => {}
            Motion::Died => {
                self.draw_scene();
                self.view.play(Cue::GameOver);
                self.game_over();
                return;
            }
            Motion::Moved => {
                if report.turned {
                    self.view.play(Cue::Turn);
                }
                for _ in &report.eaten {
                    self.view.play(Cue::Eat);
                }
                match report.outcome {
                    Some(RoundOutcome::Won { .. }) => self.finish_round(Cue::RoundWon, Status::Happy),
                    Some(RoundOutcome::Lost { .. }) => self.finish_round(Cue::RoundLost, Status::Sad),
                    None => {}
                }
                self.draw_scene();
            }
        }

        self.timeline
            .schedule(self.config.frame_interval(), TimerEvent::Frame);
    }

    fn finish_round(&mut self, cue: Cue, status: Status) {
        self.view.play(cue);
        self.view.set_status(status);
        self.timeline
            .schedule(self.config.feedback_delay(), TimerEvent::RoundReset);
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        let dropped = self.timeline.cancel_all();
        debug!(dropped, "timers cancelled for death sequence");
        self.timeline.schedule(self.death_pause(), TimerEvent::TrimTail);
        info!(
            score = self.engine.score(),
            high_score = self.engine.high_score(),
            "game over"
        );
    }

    fn start_frame_clock(&mut self) {
        let _ = self
            .timeline
            .cancel_where(|event| *event == TimerEvent::Frame || event.is_death_step());
        self.timeline
            .schedule(self.config.frame_interval(), TimerEvent::Frame);
    }

    fn death_pause(&self) -> Duration {
        self.config.frame_interval() * DEATH_PAUSE_FRAMES
    }

    fn trim_interval(&self) -> Duration {
        (self.config.frame_interval() / TRIM_STEPS_PER_FRAME).max(Duration::from_millis(1))
    }

    fn draw_scene(&mut self) {
        let snake = self.engine.snake();
        let body: Vec<_> = snake.body().copied().collect();
        let round = self.engine.round();

        self.view.clear();
        self.view.draw_snake(&body, snake.is_alive(), snake.direction());
        for candy in &round.candies {
            self.view.draw_candy(candy.position, candy.value);
        }
        self.view
            .draw_score(round.score, round.high_score, round.target, round.count);
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
