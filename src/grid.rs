use rand::Rng;

use crate::direction::Direction;
use crate::error::ConfigError;

/// A cell coordinate. Raw points may lie outside the grid until wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring point one unit step away, without wrapping.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Toroidal playfield: moving past an edge re-enters from the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// True when `point` is already inside `[0, width) x [0, height)`.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < i32::from(self.width)
            && point.y < i32::from(self.height)
    }

    #[must_use]
    pub fn wrap(&self, point: Point) -> Point {
        Point {
            x: point.x.rem_euclid(i32::from(self.width)),
            y: point.y.rem_euclid(i32::from(self.height)),
        }
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point {
            x: rng.gen_range(0..i32::from(self.width)),
            y: rng.gen_range(0..i32::from(self.height)),
        }
    }
}
