use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::candy::Arity;

/// Problems found while loading or validating a [`crate::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidGrid { width: u16, height: u16 },

    #[error("frame interval must be greater than zero")]
    InvalidFrameInterval,

    #[error("round target {target} is too small, need at least {minimum}")]
    TargetTooSmall { target: u32, minimum: u32 },

    #[error("placement_attempts must be at least 1")]
    NoPlacementAttempts,

    #[error("unknown difficulty {0:?}, expected easy, medium, hard or 1-3")]
    UnknownDifficulty(String),
}

/// A target cannot be split into the requested number of positive parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot split {target} into {} positive parts", .arity.parts())]
pub struct ComposeError {
    pub target: u32,
    pub arity: Arity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell for a candy after {attempts} attempts")]
    NoFreeCell { attempts: u32 },

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

pub type Result<T> = std::result::Result<T, GameError>;
