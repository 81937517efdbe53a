//! Crossterm renderer. Draw calls only record the scene; [`TerminalView::present`]
//! writes it out in one go.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use tracing::debug;

use crate::config::Appearance;
use crate::direction::Direction;
use crate::grid::{Grid, Point};
use crate::view::{Cue, Status, View};

/// Terminal columns per grid cell, so two-digit candies fit.
const CELL_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScoreLine {
    score: u32,
    high_score: u32,
    target: u32,
    count: u32,
}

#[derive(Debug, Clone)]
pub struct TerminalView {
    width: u16,
    height: u16,
    snake: Vec<Point>,
    alive: bool,
    direction: Direction,
    candies: Vec<(Point, u32)>,
    score: ScoreLine,
    status: Status,
    dirty: bool,
    snake_color: Color,
    candy_color: Color,
    text_color: Color,
}

impl TerminalView {
    pub fn new(grid: &Grid, appearance: &Appearance) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            snake: Vec::new(),
            alive: true,
            direction: Direction::default(),
            candies: Vec::new(),
            score: ScoreLine::default(),
            status: Status::Neutral,
            dirty: true,
            snake_color: parse_color(&appearance.snake_color, Color::Red),
            candy_color: parse_color(&appearance.candy_color, Color::Green),
            text_color: parse_color(&appearance.text_color, Color::Yellow),
        }
    }

    /// Terminal size needed to show the whole scene.
    pub fn size(&self) -> (u16, u16) {
        (
            self.width.saturating_mul(CELL_WIDTH).saturating_add(2),
            self.height.saturating_add(5),
        )
    }

    /// True once after anything in the scene changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn present<W: Write>(&self, out: &mut W, footer: &str) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), ResetColor)?;
        self.draw_border(out)?;

        for &(point, value) in &self.candies {
            self.move_to_cell(out, point)?;
            queue!(
                out,
                SetForegroundColor(self.candy_color),
                Print(format!("{value:>2}"))
            )?;
        }

        queue!(out, SetForegroundColor(self.snake_color))?;
        for (index, &point) in self.snake.iter().enumerate().rev() {
            let glyph = if index > 0 {
                "o "
            } else if !self.alive {
                "X "
            } else {
                head_glyph(self.direction)
            };
            self.move_to_cell(out, point)?;
            queue!(out, Print(glyph))?;
        }

        let bottom = self.height.saturating_add(2);
        let line = self.score;
        queue!(
            out,
            SetForegroundColor(self.text_color),
            MoveTo(0, bottom),
            Print(format!(
                "Score: {}  High: {}  {}",
                line.score,
                line.high_score,
                face(self.status)
            )),
            MoveTo(0, bottom.saturating_add(1)),
            Print(format!(
                "Sum: {}/{} {}",
                line.count,
                line.target,
                progress_bar(line.count, line.target)
            )),
            MoveTo(0, bottom.saturating_add(2)),
            Print(footer),
            ResetColor
        )?;

        out.flush()
    }

    fn draw_border<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let inner = usize::from(self.width) * usize::from(CELL_WIDTH);
        let edge = format!("+{}+", "-".repeat(inner));
        queue!(out, MoveTo(0, 0), Print(&edge))?;
        for y in 1..=self.height {
            queue!(
                out,
                MoveTo(0, y),
                Print("|"),
                MoveTo(self.width.saturating_mul(CELL_WIDTH).saturating_add(1), y),
                Print("|")
            )?;
        }
        queue!(out, MoveTo(0, self.height.saturating_add(1)), Print(&edge))
    }

    fn move_to_cell<W: Write>(&self, out: &mut W, point: Point) -> io::Result<()> {
        // Points handed to the view are always wrapped into the grid.
        let x = u16::try_from(point.x).unwrap_or(0);
        let y = u16::try_from(point.y).unwrap_or(0);
        queue!(
            out,
            MoveTo(
                x.saturating_mul(CELL_WIDTH).saturating_add(1),
                y.saturating_add(1)
            )
        )
    }
}

impl View for TerminalView {
    fn clear(&mut self) {
        self.dirty = true;
        self.snake.clear();
        self.candies.clear();
    }

    fn draw_snake(&mut self, body: &[Point], alive: bool, direction: Direction) {
        self.snake = body.to_vec();
        self.alive = alive;
        self.direction = direction;
    }

    fn draw_candy(&mut self, position: Point, value: u32) {
        self.candies.push((position, value));
    }

    fn draw_score(&mut self, score: u32, high_score: u32, target: u32, count: u32) {
        self.score = ScoreLine {
            score,
            high_score,
            target,
            count,
        };
    }

    fn set_status(&mut self, status: Status) {
        self.dirty = true;
        self.status = status;
    }

    // No audio in a terminal; cues only show up in the log.
    fn play(&mut self, cue: Cue) {
        debug!(?cue, "sound cue");
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::try_from(name).unwrap_or(fallback)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "^ ",
        Direction::Down => "v ",
        Direction::Left => "< ",
        Direction::Right => "> ",
    }
}

fn face(status: Status) -> &'static str {
    match status {
        Status::Neutral => "(-_-)",
        Status::Happy => "(^_^)",
        Status::Sad => "(;_;)",
    }
}

fn progress_bar(count: u32, target: u32) -> String {
    let filled = count.min(target) as usize;
    let empty = target.saturating_sub(count) as usize;
    let over = count.saturating_sub(target) as usize;
    format!("[{}{}{}]", "#".repeat(filled), ".".repeat(empty), "!".repeat(over))
}
