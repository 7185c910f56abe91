//! Per-tick integration: ball gravity, paddle drive, serve velocity
//!
//! Velocities are in playfield units per tick; position integration itself
//! is [`Moving::moved`](super::Moving::moved).

use glam::Vec2;
use rand::Rng;

use super::state::Moving;
use super::tick::TickEvent;
use crate::consts::*;

/// Constant downward pull on the ball, giving its flight a parabolic arc
pub fn apply_gravity(ball: &mut Moving) {
    ball.vel.y += GRAVITY;
}

/// Accelerate the paddle from held input, then damp it - or, past a
/// playfield edge, kick it back in bounds with inverted, amplified
/// velocity (a soft wall rather than a clamp).
pub fn drive_paddle(paddle: &mut Moving, left: bool, right: bool, events: &mut Vec<TickEvent>) {
    if left {
        paddle.vel.x -= PADDLE_ACCEL;
    }
    if right {
        paddle.vel.x += PADDLE_ACCEL;
    }
    if paddle.pos.x < 0.0 || paddle.pos.x > GAME_W {
        paddle.vel.x *= PADDLE_WALL_KICK;
        events.push(TickEvent::WallBounce);
    } else {
        paddle.vel.x *= PADDLE_DAMPING;
    }
}

/// Serve velocity: fixed upward speed, horizontal jitter of ±1/4 plus half
/// the paddle's momentum, so the player steers the serve with a moving
/// paddle while a standing start stays symmetric.
pub fn launch_velocity<R: Rng + ?Sized>(paddle_vel_x: f32, rng: &mut R) -> Vec2 {
    let jitter = rng.random_range(0..2) as f32 / 2.0;
    Vec2::new(0.25 - jitter + paddle_vel_x / 2.0, LAUNCH_VY)
}
