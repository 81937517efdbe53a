use rand::Rng;
use tracing::warn;

use crate::error::{ComposeError, PlacementError};
use crate::grid::{Grid, Point};
use crate::snake::Snake;

/// How many candies a single composed group is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Pair,
    Triple,
}

impl Arity {
    pub const fn parts(self) -> u32 {
        match self {
            Arity::Pair => 2,
            Arity::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CandyKind {
    #[default]
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candy {
    pub position: Point,
    pub value: u32,
    pub kind: CandyKind,
}

impl Candy {
    pub fn new(position: Point, value: u32) -> Self {
        Self {
            position,
            value,
            kind: CandyKind::Regular,
        }
    }
}

/// Randomly splits `target` into `arity` ordered positive parts summing to `target`.
pub fn compose<R: Rng + ?Sized>(
    rng: &mut R,
    target: u32,
    arity: Arity,
) -> Result<Vec<u32>, ComposeError> {
    if target < arity.parts() {
        return Err(ComposeError { target, arity });
    }

    let parts = match arity {
        Arity::Pair => {
            let (a, b) = split(rng, target);
            vec![a, b]
        }
        Arity::Triple => loop {
            let (a, b) = split(rng, target);
            let parts = if a >= b {
                let (c, rest) = split(rng, a);
                [rest, b, c]
            } else {
                let (c, rest) = split(rng, b);
                [a, rest, c]
            };
            if parts.iter().all(|&part| part >= 1) && parts.iter().sum::<u32>() == target {
                break parts.to_vec();
            }
        },
    };

    Ok(parts)
}

// Caller guarantees `total >= 2`.
fn split<R: Rng + ?Sized>(rng: &mut R, total: u32) -> (u32, u32) {
    let value = rng.gen_range(1..total);
    (value, total - value)
}

/// Drops a candy worth `value` on a random cell not covered by the snake.
///
/// Other candies are not avoided, so two candies may share a cell.
pub fn place_candy<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
    value: u32,
    max_attempts: u32,
) -> Result<Candy, PlacementError> {
    if snake.len() < grid.area() {
        for _ in 0..max_attempts {
            let position = grid.random_point(rng);
            if !snake.collides_with(position, false) {
                return Ok(Candy::new(position, value));
            }
        }
    }

    warn!(
        value,
        attempts = max_attempts,
        snake_len = snake.len(),
        "no free cell for candy"
    );
    Err(PlacementError::NoFreeCell {
        attempts: max_attempts,
    })
}
