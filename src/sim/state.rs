//! Round state and core simulation types

use glam::Vec2;

use crate::consts::*;
use crate::settings::Rules;

/// Launch state of the ball relative to the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    /// Ball rides the paddle, waiting for the launch input
    Stuck,
    /// Ball obeys full kinematics and collision
    Active,
}

/// A body integrated once per tick: `pos + vel` in playfield units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moving {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Moving {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    /// Proposed position after one tick of semi-implicit Euler
    #[inline]
    pub fn moved(&self) -> Vec2 {
        self.pos + self.vel
    }

    /// Drawn position for interpolation fraction `thru`.
    ///
    /// `thru` is half-tick-centered: 0 samples the committed position,
    /// negative values reach back toward the previous tick, positive ones
    /// ahead toward the next.
    #[inline]
    pub fn lerp(&self, thru: f32) -> Vec2 {
        crate::lerp(self.pos, self.moved(), thru)
    }
}

/// Axis-aligned rectangle, `min` is the top-left corner (y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Grow the rectangle by `amount` on the left and right edges
    pub fn widened(self, amount: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x - amount, self.min.y),
            max: Vec2::new(self.max.x + amount, self.max.y),
        }
    }
}

/// The paddle's collision rectangle for a given center position
pub fn paddle_rect(center: Vec2) -> Rect {
    Rect::new(
        Vec2::new(center.x - PADDLE_HALF_W, center.y),
        Vec2::new(center.x + PADDLE_HALF_W, center.y + PADDLE_H),
    )
}

/// Destructible brick field: row-major presence flags over a cell grid.
///
/// Invariant: `remaining` always equals the number of `true` flags. A point
/// outside the grid maps to no cell, so lookups above, below, or beside the
/// brick-bearing rows simply report "no brick" instead of erroring.
#[derive(Debug, Clone)]
pub struct BrickGrid {
    cols: usize,
    cell: Vec2,
    present: Vec<bool>,
    remaining: usize,
}

impl BrickGrid {
    /// A grid of `count` bricks, all present, filling rows left to right
    pub fn filled(cols: usize, count: usize, cell: Vec2) -> Self {
        Self {
            cols,
            cell,
            present: vec![true; count],
            remaining: count,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// Bricks still standing
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Cell index under a point, or `None` when the point lies outside the
    /// grid on any side
    pub fn cell_index(&self, p: Vec2) -> Option<usize> {
        let col = (p.x / self.cell.x).floor();
        let row = (p.y / self.cell.y).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols {
            return None;
        }
        let idx = row * self.cols + col;
        (idx < self.present.len()).then_some(idx)
    }

    /// Is there a brick under this point?
    pub fn brick_at(&self, p: Vec2) -> bool {
        self.cell_index(p).is_some_and(|i| self.present[i])
    }

    /// Presence check by cell index
    pub fn is_present(&self, idx: usize) -> bool {
        self.present[idx]
    }

    /// Remove the brick at `idx`. Returns whether one was actually there;
    /// re-destroying an empty cell never touches the counter.
    pub fn destroy(&mut self, idx: usize) -> bool {
        if self.present[idx] {
            self.present[idx] = false;
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    /// Draw rectangle of a cell, inset by the brick padding
    pub fn cell_rect(&self, idx: usize) -> Rect {
        let col = (idx % self.cols) as f32;
        let row = (idx / self.cols) as f32;
        let min = Vec2::new(col * self.cell.x, row * self.cell.y) + BRICK_PAD / 2.0;
        Rect::new(min, min + self.cell - BRICK_PAD)
    }

    /// Indices of the bricks still standing, for drawing
    pub fn standing(&self) -> impl Iterator<Item = usize> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
    }
}

/// Everything one round owns; replaced wholesale on level transition
#[derive(Debug, Clone)]
pub struct RoundState {
    pub level: u32,
    pub paddle: Moving,
    pub ball: Moving,
    pub bricks: BrickGrid,
    pub launch: LaunchState,
}

impl RoundState {
    /// Fresh round for `level` under the given rules: full grid, paddle
    /// centered near the floor, ball stuck
    pub fn new(rules: &Rules, level: u32) -> Self {
        Self {
            level,
            paddle: Moving::new(Vec2::new(GAME_W / 2.0, GAME_H - 20.0)),
            ball: Moving::default(),
            bricks: BrickGrid::filled(rules.brick_cols, rules.brick_count(level), rules.brick_cell),
            launch: LaunchState::Stuck,
        }
    }
}
