//! Bike Racer entry point
//!
//! Parses the command line, sets up logging, then either runs the terminal
//! game loop or a headless autopilot session.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use bike_racer::Settings;
use bike_racer::headless;
use bike_racer::platform::terminal::TerminalUi;
use bike_racer::platform::{FrameClock, InputState};
use bike_racer::render::build_frame;
use bike_racer::sim::{GameEvent, GamePhase, GameState, tick};
use clap::Parser;
use glam::Vec2;

const LOG_FILE: &str = "bike-racer.log";

#[derive(Parser, Debug, PartialEq)]
#[command(name = "bike-racer")]
#[command(about = "Top-down arcade racer: dodge the traffic as the road speeds up")]
struct Args {
    /// Settings file (JSON); missing or invalid files fall back to defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Start with the autopilot driving
    #[arg(long)]
    demo: bool,
    /// Simulate this many seconds without a terminal and print a JSON report
    #[arg(long, value_name = "SECONDS", value_parser = parse_duration)]
    headless: Option<f32>,
}

fn parse_duration(value: &str) -> Result<f32, String> {
    let secs: f32 = value
        .parse()
        .map_err(|_| format!("bad duration: {value}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("duration must be a non-negative number of seconds: {value}"));
    }
    Ok(secs)
}

/// Interactive mode logs to a file so the screen stays clean
fn init_logging(to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if to_file {
        match File::create(LOG_FILE) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
            }
        }
    }
    builder.init();
}

fn run_interactive(settings: &Settings, seed: u64, demo: bool) -> io::Result<()> {
    let mut state = GameState::from_settings(seed, settings);
    let view = Vec2::new(state.tuning.screen_width, state.tuning.screen_height);

    let mut ui = TerminalUi::enter()?;
    let mut input = InputState::new(ui.release_events(), demo);
    let mut clock = FrameClock::new(settings.frame_cap);

    let size = ui.size()?;
    input.resized(size.width as u32, size.height as u32);

    loop {
        let dt = clock.tick();
        let frame_input = input.take(dt);
        let events = tick(&mut state, &frame_input, dt);
        if events.contains(&GameEvent::QuitRequested) {
            break;
        }

        let hovered = if state.phase == GamePhase::Menu {
            input.hovered()
        } else {
            None
        };
        let mut frame = build_frame(&state, hovered);
        if settings.show_fps {
            frame.push_fps(clock.fps());
        }
        ui.draw(&frame, view)?;

        // Wait out the rest of the frame while listening for input
        ui.poll_events(&mut input, state.phase, clock.remaining())?;
    }

    ui.restore()?;
    if let Some(run) = &state.last_run {
        println!(
            "Last run: {:.1}s, score {}, crashed into {}",
            run.elapsed_secs,
            run.score,
            run.crashed_into.name()
        );
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    init_logging(args.headless.is_none());
    log::info!("Bike Racer starting...");

    let settings = match &args.config {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!(
        "Seed {} ({} rules, {} fps cap)",
        seed,
        settings.variant.as_str(),
        settings.frame_cap
    );

    match args.headless {
        Some(secs) => {
            let report = headless::run(&settings, seed, secs);
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            println!("{json}");
            Ok(())
        }
        None => run_interactive(&settings, seed, args.demo),
    }
}
