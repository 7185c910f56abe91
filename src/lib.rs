//! Brickfall - a brick-breaking ball game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, round state)
//! - `scene`: Scene contract and the fixed-tick loop driver
//! - `platform`: Clock/input/canvas seams with headless implementations
//! - `audio`: Sound event descriptions, generation is external
//! - `settings`: Variant policy rules and persisted user preferences
//!
//! Two shipped variants share the whole simulation: a leveled breakout
//! (rounds end on loss, bricks regrow bigger each level) and an endless
//! pong/arkanoid mode (loss re-sticks the ball, one infinite round). The
//! differences are policy data in [`settings::Rules`], not code paths.

pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::BallGame;
pub use settings::{Rules, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const TICK_LEN_MS: f64 = 1000.0 / TICK_HZ as f64;

    /// Playfield dimensions in playfield units (origin top-left, y down)
    pub const GAME_W: f32 = 240.0;
    pub const GAME_H: f32 = 160.0;

    /// Downward acceleration applied to the ball every tick
    pub const GRAVITY: f32 = 1.0 / 32.0;

    /// Paddle half-width and height
    pub const PADDLE_HALF_W: f32 = 10.0;
    pub const PADDLE_H: f32 = 4.0;
    /// Horizontal acceleration per tick while a direction key is held
    pub const PADDLE_ACCEL: f32 = 1.0;
    /// Exponential velocity damping per tick when inside the playfield
    pub const PADDLE_DAMPING: f32 = 0.75;
    /// Velocity multiplier when the paddle crosses a playfield edge.
    /// A soft wall: the paddle is kicked back in bounds instead of clamped,
    /// keeping its motion continuous for draw interpolation.
    pub const PADDLE_WALL_KICK: f32 = -3.0;
    /// Extra width on each side of the paddle's collision rectangle so a
    /// fast ball cannot slip past between samples
    pub const PADDLE_GRACE: f32 = 1.0;

    /// Vertical offset of a stuck ball above the paddle
    pub const STUCK_OFFSET: f32 = 4.0;
    /// Upward launch speed, shared by serve and paddle bounce
    pub const LAUNCH_VY: f32 = -3.0;
    /// Divisor turning the paddle-center offset into bounce angle
    pub const BOUNCE_CONTROL: f32 = 4.0;

    /// Ball half-extent, draw layout only
    pub const BALL_R: f32 = 2.0;
    /// Gap between neighbouring bricks, draw layout only
    pub const BRICK_PAD: f32 = 2.0;
}

/// Linear blend between `a` and `b`; `t` may run slightly outside [0, 1]
/// for half-tick-centered draw sampling.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}
