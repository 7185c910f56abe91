//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded, injected RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use collision::{resolve_ball, segment_hits_rect};
pub use kinematics::{apply_gravity, drive_paddle, launch_velocity};
pub use state::{BrickGrid, LaunchState, Moving, Rect, RoundState, paddle_rect};
pub use tick::{RoundOutcome, TickEvent, tick};
