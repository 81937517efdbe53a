use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::candy::Arity;
use crate::error::ConfigError;

/// Picks how candies are split and which sum a round asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "DifficultyValue")]
pub enum Difficulty {
    /// Pairs of candies adding up to 10.
    Easy,
    /// Pairs of candies adding up to 20.
    Medium,
    /// Triples of candies adding up to 10.
    #[default]
    Hard,
}

impl Difficulty {
    pub const fn arity(self) -> Arity {
        match self {
            Difficulty::Easy | Difficulty::Medium => Arity::Pair,
            Difficulty::Hard => Arity::Triple,
        }
    }

    pub const fn target(self) -> u32 {
        match self {
            Difficulty::Easy | Difficulty::Hard => 10,
            Difficulty::Medium => 20,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "easy" => Ok(Difficulty::Easy),
            "2" | "medium" => Ok(Difficulty::Medium),
            "3" | "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Difficulty as written in TOML: a name or a level number.
#[derive(Deserialize)]
#[serde(untagged)]
enum DifficultyValue {
    Level(i64),
    Name(String),
}

impl TryFrom<DifficultyValue> for Difficulty {
    type Error = ConfigError;

    fn try_from(value: DifficultyValue) -> Result<Self, Self::Error> {
        match value {
            DifficultyValue::Level(level) => level.to_string().parse(),
            DifficultyValue::Name(name) => name.parse(),
        }
    }
}

/// Cosmetic settings for the terminal renderer. The engine never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Appearance {
    pub snake_color: String,
    pub candy_color: String,
    pub text_color: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            snake_color: "red".to_string(),
            candy_color: "green".to_string(),
            text_color: "yellow".to_string(),
        }
    }
}

/// Game settings. Load with [`GameConfig::load`] or build in code, then
/// [`GameConfig::validate`] before handing it to the game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Grid columns.
    pub grid_width: u16,
    /// Grid rows.
    pub grid_height: u16,
    /// Milliseconds between frames.
    pub frame_interval_ms: u64,
    pub difficulty: Difficulty,
    /// Overrides the difficulty's round target.
    pub round_target: Option<u32>,
    /// Consecutive blocked frames survived before the snake dies.
    pub collision_tolerance: u32,
    /// Growth the snake starts with, and gets back after dying.
    pub initial_growth: u32,
    /// How long the win/lose feedback shows before the next round starts.
    pub feedback_delay_ms: u64,
    /// Random draws tried per candy before giving up.
    pub placement_attempts: u32,
    pub appearance: Appearance,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            frame_interval_ms: 150,
            difficulty: Difficulty::default(),
            round_target: None,
            collision_tolerance: 1,
            initial_growth: 1,
            feedback_delay_ms: 1000,
            placement_attempts: 1000,
            appearance: Appearance::default(),
        }
    }
}

impl GameConfig {
    /// Reads a TOML file, or returns the defaults when `path` is `None`.
    /// The result is not validated yet.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }

        if self.placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }

        let minimum = self.arity().parts();
        let target = self.target();
        if target < minimum {
            return Err(ConfigError::TargetTooSmall { target, minimum });
        }
        Ok(())
    }

    pub fn arity(&self) -> Arity {
        self.difficulty.arity()
    }

    pub fn target(&self) -> u32 {
        self.round_target.unwrap_or(self.difficulty.target())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}
