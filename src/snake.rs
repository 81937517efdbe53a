use std::collections::VecDeque;

use crate::direction::Direction;
use crate::grid::Point;

/// The player's snake. The head is the front of `body`, which is never empty.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    growth_pending: u32,
    alive: bool,
}

impl Snake {
    /// Creates a one-segment snake at `head`.
    pub fn new(head: Point, direction: Direction, growth_pending: u32) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);

        Self {
            body,
            direction,
            growth_pending,
            alive: true,
        }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Point>,
        direction: Direction,
        growth_pending: u32,
    ) -> Option<Self> {
        let body: VecDeque<Point> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }

        Some(Self {
            body,
            direction,
            growth_pending,
            alive: true,
        })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true: a snake always has its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Raw position one step from the head, before wrapping.
    pub fn next_head(&self, direction: Direction) -> Point {
        self.head().step(direction)
    }

    /// Direction the snake will actually take when the player asks for `desired`.
    ///
    /// A lone head may turn anywhere. A longer snake ignores a full reversal,
    /// which would drive the head straight into its neck.
    pub fn resolve_direction(&self, desired: Direction) -> Direction {
        if self.body.len() == 1 {
            desired
        } else if desired.is_opposite(self.direction) {
            self.direction
        } else {
            desired
        }
    }

    /// Tests `point` against the body.
    ///
    /// With `simulate_tail_removal` and no growth pending the tail is skipped,
    /// since it is vacated by the same move that would occupy `point`.
    pub fn collides_with(&self, point: Point, simulate_tail_removal: bool) -> bool {
        let range = if simulate_tail_removal && self.growth_pending == 0 {
            self.body.len() - 1
        } else {
            self.body.len()
        };

        self.body.iter().take(range).any(|segment| *segment == point)
    }

    /// Commits a move to `new_head`, growing by one segment if growth is pending.
    pub fn apply_move(&mut self, new_head: Point, direction: Direction) {
        self.direction = direction;
        self.body.push_front(new_head);

        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            self.body.pop_back();
        }
    }

    pub fn grow(&mut self, segments: u32) {
        self.growth_pending = self.growth_pending.saturating_add(segments);
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Drops the last segment unless only the head is left. Returns whether one was removed.
    pub fn trim_tail(&mut self) -> bool {
        if self.body.len() > 1 {
            self.body.pop_back();
            true
        } else {
            false
        }
    }

    /// Brings a dead snake back in place with fresh growth.
    pub fn revive(&mut self, growth_pending: u32) {
        self.growth_pending = growth_pending;
        self.alive = true;
    }
}
