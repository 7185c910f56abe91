//! Fixed timestep simulation tick
//!
//! Advances one round deterministically: kinematics, then collision
//! resolution, then the launch/outcome state machine. All randomness comes
//! through the injected generator.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_ball;
use super::kinematics::{apply_gravity, drive_paddle, launch_velocity};
use super::state::{LaunchState, RoundState};
use crate::consts::*;
use crate::input::{InputSnapshot, Key};
use crate::settings::Rules;

/// Fire-and-forget notifications emitted while a tick runs. The scene
/// forwards them to the audio/flash collaborators and never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    WallBounce,
    BrickBroken,
    PaddleBounce,
    Launched,
    BallLost,
}

/// What a finished tick means for the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    /// Last brick fell; leveled variant only
    Cleared,
    /// Ball left the bottom of the field under terminate-on-loss rules
    Lost,
}

/// Advance the round by one fixed timestep.
///
/// Events accumulate into `events` (not cleared here, so a caller can batch
/// several ticks); the outcome tells the scene whether the round goes on.
pub fn tick<R: Rng + ?Sized>(
    state: &mut RoundState,
    input: &InputSnapshot,
    rules: &Rules,
    rng: &mut R,
    events: &mut Vec<TickEvent>,
) -> RoundOutcome {
    apply_gravity(&mut state.ball);
    drive_paddle(
        &mut state.paddle,
        input.is_down(Key::Left),
        input.is_down(Key::Right),
        events,
    );

    if state.launch == LaunchState::Stuck {
        // The ball rides the paddle: pinned a fixed offset above it, its
        // velocity mirroring the paddle's so draw interpolation tracks.
        state.paddle.pos = state.paddle.moved();
        state.ball.pos = state.paddle.pos - Vec2::new(0.0, STUCK_OFFSET);
        state.ball.vel = state.paddle.vel;

        // Launch on the press edge only; holding the key must not re-serve
        if input.pressed(Key::Launch) {
            state.ball.vel = launch_velocity(state.paddle.vel.x, rng);
            state.launch = LaunchState::Active;
            events.push(TickEvent::Launched);
        }
        return RoundOutcome::Continue;
    }

    if state.ball.pos.y > GAME_H {
        events.push(TickEvent::BallLost);
        if rules.terminate_on_loss {
            return RoundOutcome::Lost;
        }
        // endless variant: the round never ends, the ball re-sticks
        state.launch = LaunchState::Stuck;
        return RoundOutcome::Continue;
    }

    let moved_paddle = state.paddle.moved();
    let moved_ball = resolve_ball(
        &mut state.ball,
        moved_paddle,
        &mut state.bricks,
        rules.bounded_top,
        events,
    );
    state.paddle.pos = moved_paddle;
    state.ball.pos = moved_ball;

    if state.bricks.remaining() == 0 && rules.progression.is_some() {
        return RoundOutcome::Cleared;
    }
    RoundOutcome::Continue
}
