//! Headless platform implementations for tests and demo runs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Canvas, Clock, Color, EventPump, PlatformEvent};
use crate::sim::Rect;

/// Deterministic clock advancing a fixed step on every query, so driver
/// runs are reproducible without touching the wall clock
pub struct StepClock {
    now: f64,
    step: f64,
}

impl StepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: 0.0,
            step: step_ms,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Scripted event source: one batch of events per loop iteration. When the
/// script runs out it reports [`PlatformEvent::Quit`], so a driver fed from
/// it always terminates.
pub struct QueuedEvents {
    batches: VecDeque<Vec<PlatformEvent>>,
    current: VecDeque<PlatformEvent>,
}

impl QueuedEvents {
    pub fn new(batches: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            batches: batches.into(),
            current: VecDeque::new(),
        }
    }

    /// A script of `n` event-free iterations
    pub fn quiet(n: usize) -> Self {
        Self::new(vec![Vec::new(); n])
    }
}

impl EventPump for QueuedEvents {
    fn begin_tick(&mut self) {
        if let Some(batch) = self.batches.pop_front() {
            self.current = batch.into();
        } else {
            self.current = vec![PlatformEvent::Quit].into();
        }
    }

    fn poll(&mut self) -> Option<PlatformEvent> {
        self.current.pop_front()
    }
}

/// Canvas that discards everything
#[derive(Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self, _color: Color) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn present(&mut self) {}
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Rect(Rect, Color),
    Present,
}

/// Canvas that records draw calls so tests can assert on frame structure.
/// Clones share the same log, so a test can keep a handle while the boxed
/// canvas lives inside a `Context` (everything here is single-threaded).
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded draw calls
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    /// Number of presented frames
    pub fn frames(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, DrawOp::Present))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Rect(rect, color));
    }

    fn present(&mut self) {
        self.ops.borrow_mut().push(DrawOp::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn step_clock_is_monotonic_and_even() {
        let mut clock = StepClock::new(4.0);
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.now_ms(), 4.0);
        assert_eq!(clock.now_ms(), 8.0);
    }

    #[test]
    fn queued_events_deliver_one_batch_per_tick_then_quit() {
        let mut pump = QueuedEvents::new(vec![
            vec![PlatformEvent::KeyDown(Key::Launch)],
            vec![],
            vec![PlatformEvent::KeyUp(Key::Launch)],
        ]);

        pump.begin_tick();
        assert_eq!(pump.poll(), Some(PlatformEvent::KeyDown(Key::Launch)));
        assert_eq!(pump.poll(), None);

        pump.begin_tick();
        assert_eq!(pump.poll(), None);

        pump.begin_tick();
        assert_eq!(pump.poll(), Some(PlatformEvent::KeyUp(Key::Launch)));
        assert_eq!(pump.poll(), None);

        // script exhausted: quit so drivers terminate
        pump.begin_tick();
        assert_eq!(pump.poll(), Some(PlatformEvent::Quit));
    }
}
