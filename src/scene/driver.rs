//! Fixed-tick loop driver
//!
//! Separates simulation from presentation: updates happen at a constant
//! 60 Hz cadence against deadlines computed from the start time, draws
//! happen as often as the clock allows until the next deadline, each with
//! an interpolation fraction so motion stays smooth at any display rate.

use glam::Vec2;

use super::{Context, Scene, Transition};
use crate::consts::*;
use crate::input::{InputState, Key};
use crate::platform::{Clock, Color, EventPump, PlatformEvent};
use crate::sim::Rect;

const BACKDROP: Color = Color::rgb(20, 30, 40);
const FLASH_BLUE: u8 = 200;

/// Owns the tick scheduler, the live input state, and the pause flag
pub struct Driver {
    clock: Box<dyn Clock>,
    events: Box<dyn EventPump>,
    input: InputState,
    paused: bool,
}

impl Driver {
    pub fn new(clock: Box<dyn Clock>, events: Box<dyn EventPump>) -> Self {
        Self {
            clock,
            events,
            input: InputState::new(),
            paused: false,
        }
    }

    /// Run `root` (and whatever scenes it switches to) until a scene quits
    /// or the platform signals quit. Scene teardown always runs; dropping
    /// the context afterwards releases the platform collaborators.
    pub fn run(&mut self, ctx: &mut Context, root: Box<dyn Scene>) {
        let mut scene = root;
        scene.init(ctx);

        let start = self.clock.now_ms();
        let mut tick_count: u64 = 1;

        'main: loop {
            self.events.begin_tick();
            while let Some(event) = self.events.poll() {
                match event {
                    PlatformEvent::Quit => break 'main,
                    // hotkeys are intercepted here and never reach the scene
                    PlatformEvent::KeyDown(Key::Pause) => {
                        self.paused = !self.paused;
                        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                    }
                    PlatformEvent::KeyDown(Key::Mute) => ctx.audio.toggle_muted(),
                    PlatformEvent::KeyDown(key) => self.input.press(key),
                    PlatformEvent::KeyUp(key) => self.input.release(key),
                }
            }

            let snapshot = self.input.advance();
            if !self.paused {
                match scene.update(&snapshot, ctx) {
                    Transition::Continue => {}
                    Transition::Quit => break 'main,
                    Transition::Switch(next) => {
                        scene.teardown(ctx);
                        scene = next;
                        scene.init(ctx);
                    }
                }
            }

            // Draw until the next tick's deadline. The fraction is
            // half-tick-centered, so it legitimately runs a little below
            // and above the [0, 1] band.
            let deadline = start + tick_count as f64 * TICK_LEN_MS;
            loop {
                let now = self.clock.now_ms();
                if now >= deadline {
                    break;
                }
                let thru = (0.5 + (now - deadline) / TICK_LEN_MS) as f32;
                self.paint_backdrop(ctx);
                scene.draw(ctx, thru);
                ctx.canvas.present();
            }
            tick_count += 1;
        }

        scene.teardown(ctx);
    }

    fn paint_backdrop(&self, ctx: &mut Context) {
        ctx.canvas.clear(BACKDROP);
        let blue = if ctx.flash_frames % 8 > 4 { FLASH_BLUE } else { 0 };
        if ctx.flash_frames > 0 {
            ctx.flash_frames -= 1;
        }
        let field = Rect::new(Vec2::ZERO, Vec2::new(GAME_W, GAME_H));
        ctx.canvas.fill_rect(field, Color::rgb(0, 0, blue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::audio::NullAudio;
    use crate::input::InputSnapshot;
    use crate::platform::{QueuedEvents, RecordingCanvas, StepClock};
    use crate::settings::Settings;

    #[derive(Default)]
    struct Probe {
        log: Vec<String>,
        thrus: Vec<f32>,
        launch_counts: Vec<u32>,
        mute_counts: Vec<u32>,
    }

    /// Scene that records everything the driver does to it and quits after
    /// a fixed number of updates
    struct ProbeScene {
        name: &'static str,
        probe: Rc<RefCell<Probe>>,
        updates_left: u32,
        switch_to: Option<Box<dyn Scene>>,
    }

    impl ProbeScene {
        fn new(name: &'static str, probe: Rc<RefCell<Probe>>, updates_left: u32) -> Self {
            Self {
                name,
                probe,
                updates_left,
                switch_to: None,
            }
        }
    }

    impl Scene for ProbeScene {
        fn init(&mut self, _ctx: &mut Context) {
            self.probe.borrow_mut().log.push(format!("{}.init", self.name));
        }

        fn update(&mut self, input: &InputSnapshot, _ctx: &mut Context) -> Transition {
            let mut probe = self.probe.borrow_mut();
            probe.log.push(format!("{}.update", self.name));
            probe.launch_counts.push(input.held(Key::Launch));
            probe.mute_counts.push(input.held(Key::Mute));
            drop(probe);

            if let Some(next) = self.switch_to.take() {
                return Transition::Switch(next);
            }
            self.updates_left -= 1;
            if self.updates_left == 0 {
                Transition::Quit
            } else {
                Transition::Continue
            }
        }

        fn draw(&self, _ctx: &mut Context, thru: f32) {
            self.probe.borrow_mut().thrus.push(thru);
        }

        fn teardown(&mut self, _ctx: &mut Context) {
            self.probe.borrow_mut().log.push(format!("{}.teardown", self.name));
        }
    }

    fn test_ctx() -> Context {
        Context::new(
            Box::new(RecordingCanvas::new()),
            Box::new(NullAudio::default()),
            Settings::default(),
        )
    }

    fn driver(step_ms: f64, batches: Vec<Vec<PlatformEvent>>) -> Driver {
        Driver::new(
            Box::new(StepClock::new(step_ms)),
            Box::new(QueuedEvents::new(batches)),
        )
    }

    #[test]
    fn one_update_per_tick_and_interpolated_draws_between() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 5);
        let mut ctx = test_ctx();
        // 4 ms per clock query: several draws fit into each 16.7 ms tick
        driver(4.0, vec![Vec::new(); 32]).run(&mut ctx, Box::new(scene));

        let probe = probe.borrow();
        let updates = probe.log.iter().filter(|l| l.ends_with("update")).count();
        assert_eq!(updates, 5);
        assert!(!probe.thrus.is_empty());
        // half-tick-centered band
        for &thru in &probe.thrus {
            assert!((-0.5..=0.5).contains(&thru), "thru out of band: {thru}");
        }
        // draws happened between ticks, several per tick at this clock rate
        assert!(probe.thrus.len() >= updates);
    }

    #[test]
    fn draw_paints_backdrop_then_presents() {
        use crate::platform::headless::DrawOp;

        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 2);
        let canvas = RecordingCanvas::new();
        let mut ctx = Context::new(
            Box::new(canvas.clone()),
            Box::new(NullAudio::default()),
            Settings::default(),
        );
        driver(4.0, vec![Vec::new(); 8]).run(&mut ctx, Box::new(scene));

        let ops = canvas.ops();
        assert!(canvas.frames() > 0);
        assert_eq!(canvas.frames(), probe.borrow().thrus.len());
        // every frame: clear, field rect, (scene draws), present
        assert!(matches!(ops.first(), Some(DrawOp::Clear(c)) if *c == BACKDROP));
        assert!(matches!(ops.get(1), Some(DrawOp::Rect(_, _))));
        assert!(matches!(ops.get(2), Some(DrawOp::Present)));
    }

    #[test]
    fn pause_hotkey_gates_updates() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 100);
        let mut ctx = test_ctx();
        driver(
            20.0,
            vec![
                vec![PlatformEvent::KeyDown(Key::Pause)], // pause on
                vec![],
                vec![PlatformEvent::KeyDown(Key::Pause)], // pause off
                vec![],
            ],
        )
        .run(&mut ctx, Box::new(scene));

        let updates = probe
            .borrow()
            .log
            .iter()
            .filter(|l| l.ends_with("update"))
            .count();
        // only the two unpaused iterations updated
        assert_eq!(updates, 2);
    }

    #[test]
    fn mute_hotkey_toggles_audio_and_stays_out_of_the_snapshot() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 100);
        let mut ctx = test_ctx();
        driver(
            20.0,
            vec![vec![PlatformEvent::KeyDown(Key::Mute)], vec![]],
        )
        .run(&mut ctx, Box::new(scene));

        assert!(ctx.audio.muted());
        assert!(probe.borrow().mute_counts.iter().all(|&c| c == 0));
    }

    #[test]
    fn held_key_counters_reach_the_scene() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 3);
        let mut ctx = test_ctx();
        driver(
            20.0,
            vec![
                vec![PlatformEvent::KeyDown(Key::Launch)],
                vec![],
                vec![PlatformEvent::KeyUp(Key::Launch)],
            ],
        )
        .run(&mut ctx, Box::new(scene));

        assert_eq!(probe.borrow().launch_counts, vec![1, 2, 0]);
    }

    #[test]
    fn switch_runs_teardown_and_init_in_order() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let second = ProbeScene::new("b", probe.clone(), 1);
        let mut first = ProbeScene::new("a", probe.clone(), 100);
        first.switch_to = Some(Box::new(second));
        let mut ctx = test_ctx();
        driver(20.0, vec![Vec::new(); 8]).run(&mut ctx, Box::new(first));

        assert_eq!(
            probe.borrow().log,
            vec![
                "a.init",
                "a.update",
                "a.teardown",
                "b.init",
                "b.update",
                "b.teardown"
            ]
        );
    }

    #[test]
    fn quit_event_ends_the_loop_with_teardown() {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let scene = ProbeScene::new("a", probe.clone(), 100);
        let mut ctx = test_ctx();
        driver(20.0, vec![vec![PlatformEvent::Quit]]).run(&mut ctx, Box::new(scene));

        let log = &probe.borrow().log;
        assert_eq!(log.first().map(String::as_str), Some("a.init"));
        assert_eq!(log.last().map(String::as_str), Some("a.teardown"));
        assert!(!log.iter().any(|l| l.ends_with("update")));
    }
}
