//! Sound cues and the audio seam
//!
//! Gameplay emits fire-and-forget cues; tone generation is a platform
//! concern behind [`AudioOutput`]. Each effect carries a [`Tone`]
//! description so every backend renders the same soundscape.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball or paddle bounces off a playfield edge
    WallHit,
    /// Brick destroyed
    BrickBreak,
    /// Ball bounces off the paddle
    PaddleHit,
    /// Ball served from the paddle
    Launch,
    /// Ball fell out of the field
    Loss,
}

/// A beep description: semitone offset from the backend's base pitch, plus
/// a per-frame pitch sweep (0 = steady, negative = falling)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub semitone: i32,
    pub sweep: f32,
}

impl SoundEffect {
    /// The tone a backend should render for this cue
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::WallHit => Tone {
                semitone: 24,
                sweep: 0.0,
            },
            SoundEffect::BrickBreak => Tone {
                semitone: 48,
                sweep: 0.0,
            },
            SoundEffect::PaddleHit => Tone {
                semitone: 36,
                sweep: 0.0,
            },
            SoundEffect::Launch => Tone {
                semitone: 36,
                sweep: -0.5,
            },
            SoundEffect::Loss => Tone {
                semitone: 36,
                sweep: 0.1,
            },
        }
    }
}

/// The audio backend seam. Implementations must treat every call as
/// fire-and-forget; the simulation never waits on playback.
pub trait AudioOutput {
    fn play(&mut self, effect: SoundEffect);

    /// Short jingle when a new level starts
    fn level_jingle(&mut self, level: u32) {
        let _ = level;
    }

    fn set_muted(&mut self, muted: bool);
    fn muted(&self) -> bool;

    fn toggle_muted(&mut self) {
        let muted = !self.muted();
        self.set_muted(muted);
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
    }
}

/// Backend that discards every cue
#[derive(Debug, Default)]
pub struct NullAudio {
    muted: bool,
}

impl AudioOutput for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn muted(&self) -> bool {
        self.muted
    }
}

/// Backend that logs cues, used by the headless demo runs
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl AudioOutput for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            let tone = effect.tone();
            log::debug!(
                "sfx {:?}: semitone {} sweep {}",
                effect,
                tone.semitone,
                tone.sweep
            );
        }
    }

    fn level_jingle(&mut self, level: u32) {
        if !self.muted {
            log::debug!("jingle for level {level}");
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn muted(&self) -> bool {
        self.muted
    }
}
