//! Brickfall entry point
//!
//! There is no bundled windowing backend; this binary runs the game
//! against the headless platform implementations. The default mode drives
//! the simulation as fast as it will go with a small autopilot on the
//! paddle; `--paced` runs the real-time loop driver against the monotonic
//! clock with a scripted serve.

use std::env;
use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use brickfall::audio::LogAudio;
use brickfall::input::{InputState, Key};
use brickfall::platform::{MonotonicClock, NullCanvas, PlatformEvent, QueuedEvents};
use brickfall::scene::{Context, Driver, Scene, Transition};
use brickfall::sim::LaunchState;
use brickfall::{BallGame, Rules, Settings};

const SETTINGS_PATH: &str = "brickfall-settings.json";

struct DemoArgs {
    endless: bool,
    paced: bool,
    seed: u64,
    ticks: u32,
}

fn usage() -> ! {
    eprintln!("usage: brickfall [--endless] [--paced] [--seed N] [--ticks N]");
    process::exit(2);
}

fn parse_args() -> DemoArgs {
    let mut parsed = DemoArgs {
        endless: false,
        paced: false,
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
        ticks: 3600,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--endless" => parsed.endless = true,
            "--paced" => parsed.paced = true,
            "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                Some(seed) => parsed.seed = seed,
                None => usage(),
            },
            "--ticks" => match args.next().and_then(|v| v.parse().ok()) {
                Some(ticks) => parsed.ticks = ticks,
                None => usage(),
            },
            _ => usage(),
        }
    }
    parsed
}

fn main() {
    env_logger::init();

    let args = parse_args();
    let rules = if args.endless {
        Rules::endless()
    } else {
        Rules::breakout()
    };
    let settings = Settings::load(Path::new(SETTINGS_PATH));

    log::info!(
        "brickfall {} demo: seed {}, {} ticks",
        if args.endless { "endless" } else { "breakout" },
        args.seed,
        args.ticks
    );

    let mut ctx = Context::new(
        Box::new(NullCanvas),
        Box::new(LogAudio::default()),
        settings.clone(),
    );

    if args.paced {
        run_paced(&mut ctx, rules, args.seed, args.ticks);
    } else {
        run_headless(&mut ctx, rules, args.seed, args.ticks);
    }

    settings.save(Path::new(SETTINGS_PATH));
}

/// Real-time run: the loop driver paces ticks off the wall clock while a
/// scripted pump serves the ball and then lets it fly
fn run_paced(ctx: &mut Context, rules: Rules, seed: u64, ticks: u32) {
    let mut batches = vec![
        vec![PlatformEvent::KeyDown(Key::Launch)],
        vec![PlatformEvent::KeyUp(Key::Launch)],
    ];
    batches.resize(ticks as usize, Vec::new());

    let mut driver = Driver::new(
        Box::new(MonotonicClock::new()),
        Box::new(QueuedEvents::new(batches)),
    );
    driver.run(ctx, Box::new(BallGame::new(rules, seed)));
}

/// Unpaced run: ticks back to back, with an autopilot holding the paddle
/// under the ball and serving whenever the ball sticks
fn run_headless(ctx: &mut Context, rules: Rules, seed: u64, ticks: u32) {
    let mut game = BallGame::new(rules, seed);
    let mut input = InputState::new();

    game.init(ctx);
    for tick in 0..ticks {
        autopilot(&mut input, &game);
        let snapshot = input.advance();
        match game.update(&snapshot, ctx) {
            Transition::Continue => {}
            Transition::Quit => {
                log::info!("round over after {tick} ticks");
                break;
            }
            Transition::Switch(_) => {
                // the successor is the same scene update just produced;
                // rebuilding it here keeps the concrete type for the autopilot
                game.teardown(ctx);
                game = game.successor();
                game.init(ctx);
            }
        }
    }
    game.teardown(ctx);

    let state = game.state();
    log::info!(
        "finished: level {}, {} bricks left, ball {:?}",
        state.level,
        state.bricks.remaining(),
        state.launch
    );
}

/// Keep the paddle under the ball; serve on fresh sticks
fn autopilot(input: &mut InputState, game: &BallGame) {
    let state = game.state();
    if state.launch == LaunchState::Stuck {
        input.press(Key::Launch);
    } else {
        input.release(Key::Launch);
    }

    let offset = state.ball.pos.x - state.paddle.pos.x;
    if offset < -2.0 {
        input.press(Key::Left);
        input.release(Key::Right);
    } else if offset > 2.0 {
        input.press(Key::Right);
        input.release(Key::Left);
    } else {
        input.release(Key::Left);
        input.release(Key::Right);
    }
}
