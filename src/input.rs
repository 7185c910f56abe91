//! Keyboard input as held-duration counters
//!
//! The platform layer feeds key transitions in; once per tick the driver
//! snapshots the counters and ages them, so scenes can tell "pressed this
//! tick" (count 1) from "held" (count > 1) without seeing raw events.

/// The keys the simulation cares about. Pause and Mute are hotkeys the
/// driver intercepts; they never appear in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Launch,
    Pause,
    Mute,
}

impl Key {
    pub const COUNT: usize = 5;

    #[inline]
    fn idx(self) -> usize {
        self as usize
    }
}

/// Live key state, mutated by platform events between ticks
#[derive(Debug, Default)]
pub struct InputState {
    held: [u32; Key::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Repeat events while already held are ignored so the
    /// "pressed this tick" edge fires once per physical press.
    pub fn press(&mut self, key: Key) {
        let h = &mut self.held[key.idx()];
        if *h == 0 {
            *h = 1;
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.idx()] = 0;
    }

    /// Snapshot the counters for this tick, then age every held key
    pub fn advance(&mut self) -> InputSnapshot {
        let snap = InputSnapshot { held: self.held };
        for h in &mut self.held {
            if *h > 0 {
                *h = h.saturating_add(1);
            }
        }
        snap
    }
}

/// Immutable per-tick view of the key counters
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    held: [u32; Key::COUNT],
}

impl InputSnapshot {
    /// 0 = not held, 1 = pressed this tick, n = held for n ticks
    pub fn held(&self, key: Key) -> u32 {
        self.held[key.idx()]
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held(key) > 0
    }

    /// True exactly on the tick the key went down
    pub fn pressed(&self, key: Key) -> bool {
        self.held(key) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_age_once_per_tick() {
        let mut input = InputState::new();
        input.press(Key::Left);
        assert_eq!(input.advance().held(Key::Left), 1);
        assert_eq!(input.advance().held(Key::Left), 2);
        assert_eq!(input.advance().held(Key::Left), 3);
        assert_eq!(input.advance().held(Key::Right), 0);
    }

    #[test]
    fn pressed_is_a_single_tick_edge() {
        let mut input = InputState::new();
        input.press(Key::Launch);
        let first = input.advance();
        let second = input.advance();
        assert!(first.pressed(Key::Launch));
        assert!(!second.pressed(Key::Launch));
        assert!(second.is_down(Key::Launch));
    }

    #[test]
    fn repeat_events_do_not_retrigger_the_edge() {
        let mut input = InputState::new();
        input.press(Key::Launch);
        input.advance();
        // OS key repeat while still held
        input.press(Key::Launch);
        assert!(!input.advance().pressed(Key::Launch));
    }

    #[test]
    fn release_then_press_fires_a_new_edge() {
        let mut input = InputState::new();
        input.press(Key::Launch);
        input.advance();
        input.release(Key::Launch);
        assert_eq!(input.advance().held(Key::Launch), 0);
        input.press(Key::Launch);
        assert!(input.advance().pressed(Key::Launch));
    }
}
