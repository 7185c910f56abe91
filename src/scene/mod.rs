//! Scene contract and loop driver
//!
//! A [`Scene`] is one screen of the game: it is updated exactly once per
//! simulation tick and drawn any number of times in between. The
//! [`driver`](driver::Driver) owns the tick cadence; the [`Context`] owns
//! the platform collaborators, passed explicitly instead of living in
//! process-wide state.

pub mod driver;

pub use driver::Driver;

use crate::audio::AudioOutput;
use crate::input::InputSnapshot;
use crate::platform::Canvas;
use crate::settings::Settings;

/// Explicitly owned bundle of platform collaborators. Created by the
/// caller, handed to the driver and every scene callback, torn down by
/// Drop when the root scene ends.
pub struct Context {
    pub canvas: Box<dyn Canvas>,
    pub audio: Box<dyn AudioOutput>,
    pub settings: Settings,
    /// Border-flash frames still pending; decays once per drawn frame
    pub(crate) flash_frames: u32,
}

impl Context {
    pub fn new(canvas: Box<dyn Canvas>, audio: Box<dyn AudioOutput>, settings: Settings) -> Self {
        let muted = settings.muted;
        let mut ctx = Self {
            canvas,
            audio,
            settings,
            flash_frames: 0,
        };
        ctx.audio.set_muted(muted);
        ctx
    }

    /// Arm the border flash for the next `frames` drawn frames
    pub fn flash(&mut self, frames: u32) {
        if self.settings.flash_enabled {
            self.flash_frames = frames;
        }
    }
}

/// What a scene wants to happen after an update
pub enum Transition {
    /// Keep running
    Continue,
    /// End the loop; the driver tears the scene down
    Quit,
    /// Replace this scene with another (level advance); teardown and init
    /// run in order, the tick cadence is unbroken
    Switch(Box<dyn Scene>),
}

/// One screen of the game
pub trait Scene {
    /// Called once when the scene becomes active
    fn init(&mut self, _ctx: &mut Context) {}

    /// Called exactly once per simulation tick
    fn update(&mut self, input: &InputSnapshot, ctx: &mut Context) -> Transition;

    /// Called zero or more times between ticks. `thru` is the
    /// half-tick-centered interpolation fraction; implementations must not
    /// mutate simulation state (hence `&self`).
    fn draw(&self, ctx: &mut Context, thru: f32);

    /// Called once when the scene ends, releasing per-round allocations
    fn teardown(&mut self, _ctx: &mut Context) {}
}
