//! The playable brick-breaking scene
//!
//! Wires the simulation into the [`Scene`] contract: one `tick` per
//! update, tick events forwarded to the audio and flash collaborators,
//! interpolated drawing, and level advance by scene switch.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::input::InputSnapshot;
use crate::platform::Color;
use crate::scene::{Context, Scene, Transition};
use crate::settings::Rules;
use crate::sim::{self, Rect, RoundOutcome, RoundState, TickEvent};

const BRICK_COLOR: Color = Color::rgb(255, 0, 0);
const BODY_COLOR: Color = Color::rgb(255, 255, 255);
/// Border flash length on loss and level advance, in drawn frames
const FLASH_FRAMES: u32 = 24;

/// One round of the game as a scene. The round state (including the brick
/// grid) lives exactly as long as the scene; a cleared level switches to a
/// fresh scene owning the next, bigger grid.
pub struct BallGame {
    rules: Rules,
    state: RoundState,
    rng: Pcg32,
    seed: u64,
    events: Vec<TickEvent>,
}

impl BallGame {
    pub fn new(rules: Rules, seed: u64) -> Self {
        Self::with_level(rules, seed, 0)
    }

    fn with_level(rules: Rules, seed: u64, level: u32) -> Self {
        Self {
            state: RoundState::new(&rules, level),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(level as u64)),
            seed,
            rules,
            events: Vec::new(),
        }
    }

    /// The scene that follows a cleared round
    pub fn successor(&self) -> Self {
        Self::with_level(self.rules.clone(), self.seed, self.state.level + 1)
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn dispatch(&self, event: TickEvent, ctx: &mut Context) {
        if self.rules.audio_cues {
            let effect = match event {
                TickEvent::WallBounce => SoundEffect::WallHit,
                TickEvent::BrickBroken => SoundEffect::BrickBreak,
                TickEvent::PaddleBounce => SoundEffect::PaddleHit,
                TickEvent::Launched => SoundEffect::Launch,
                TickEvent::BallLost => SoundEffect::Loss,
            };
            ctx.audio.play(effect);
        }
        if event == TickEvent::BallLost {
            ctx.flash(FLASH_FRAMES);
        }
    }
}

impl Scene for BallGame {
    fn init(&mut self, ctx: &mut Context) {
        log::info!(
            "level {}: {} bricks",
            self.state.level,
            self.state.bricks.remaining()
        );
        if self.rules.audio_cues {
            ctx.audio.level_jingle(self.state.level);
        }
        if self.state.level > 0 {
            ctx.flash(FLASH_FRAMES);
        }
    }

    fn update(&mut self, input: &InputSnapshot, ctx: &mut Context) -> Transition {
        self.events.clear();
        let mut events = std::mem::take(&mut self.events);
        let outcome = sim::tick(&mut self.state, input, &self.rules, &mut self.rng, &mut events);
        for &event in &events {
            self.dispatch(event, ctx);
        }
        self.events = events;

        match outcome {
            RoundOutcome::Continue => Transition::Continue,
            RoundOutcome::Lost => {
                log::info!("round lost on level {}", self.state.level);
                Transition::Quit
            }
            RoundOutcome::Cleared => {
                log::info!("level {} cleared", self.state.level);
                Transition::Switch(Box::new(self.successor()))
            }
        }
    }

    fn draw(&self, ctx: &mut Context, thru: f32) {
        for idx in self.state.bricks.standing() {
            ctx.canvas
                .fill_rect(self.state.bricks.cell_rect(idx), BRICK_COLOR);
        }

        let ball = self.state.ball.lerp(thru);
        ctx.canvas
            .fill_rect(Rect::new(ball - BALL_R, ball + BALL_R), BODY_COLOR);
        let paddle = self.state.paddle.lerp(thru);
        ctx.canvas.fill_rect(sim::paddle_rect(paddle), BODY_COLOR);
    }

    fn teardown(&mut self, _ctx: &mut Context) {
        log::debug!("dropping level {} round state", self.state.level);
    }
}
