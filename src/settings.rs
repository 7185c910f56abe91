//! Variant policy rules and persisted user preferences
//!
//! [`Rules`] is the data describing one shipped variant; the simulation
//! consults it instead of branching on a variant name. [`Settings`] are
//! user preferences, persisted as JSON next to the executable.

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-level brick growth for the leveled variant:
/// `count = base + level * increment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub base: usize,
    pub increment: usize,
}

/// Policy knobs separating the two shipped variants.
///
/// The leveled breakout terminates on loss, leaves the top edge open, and
/// regrows a bigger grid each cleared level; the endless mode re-sticks the
/// ball on loss, bounces off the ceiling, and keeps one fixed grid forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// End the round (and scene) when the ball falls out; otherwise the
    /// ball returns to the paddle and play continues
    pub terminate_on_loss: bool,
    /// Reflect the ball off the top edge; the leveled game leaves it open
    pub bounded_top: bool,
    /// Level progression; `None` means a single infinite round
    pub progression: Option<Progression>,
    /// Whether gameplay emits sound cues
    pub audio_cues: bool,
    /// Brick grid columns
    pub brick_cols: usize,
    /// Size of one grid cell in playfield units
    pub brick_cell: Vec2,
    /// Rows filled when there is no progression; ignored otherwise
    pub grid_rows: usize,
}

impl Rules {
    /// The leveled breakout variant
    pub fn breakout() -> Self {
        Self {
            terminate_on_loss: true,
            bounded_top: false,
            progression: Some(Progression {
                base: 30,
                increment: 20,
            }),
            audio_cues: true,
            brick_cols: 10,
            brick_cell: Vec2::new(GAME_W / 10.0, GAME_H / 12.0),
            grid_rows: 3,
        }
    }

    /// The endless pong/arkanoid variant
    pub fn endless() -> Self {
        Self {
            terminate_on_loss: false,
            bounded_top: true,
            progression: None,
            audio_cues: false,
            brick_cols: 10,
            brick_cell: Vec2::new(GAME_W / 10.0, GAME_H / 16.0),
            grid_rows: 4,
        }
    }

    /// Bricks a fresh round at `level` starts with
    pub fn brick_count(&self, level: u32) -> usize {
        match self.progression {
            Some(p) => p.base + level as usize * p.increment,
            None => self.brick_cols * self.grid_rows,
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Start muted
    pub muted: bool,
    /// Border flash effect on loss/level transitions
    pub flash_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            flash_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) {
        match self.write_to(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings to {}: {err}", path.display()),
        }
    }

    fn write_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
