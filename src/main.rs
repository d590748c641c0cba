//! Replays a touch script through a drag recognizer and logs what it reports
//!
//! Usage: `touchkit [script.ron]`. Without a path the built-in example runs.
//! Set `RUST_LOG=debug` to see state transitions.

use std::process::ExitCode;

use touchkit::prelude::*;
use touchkit::replay::{TouchScript, replay};

fn run() -> Result<(), ConfigError> {
    let script = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading touch script from {path}");
            TouchScript::load_ron(path)?
        }
        None => {
            log::info!("No script given, replaying the built-in example");
            TouchScript::example()
        }
    };

    let mut drag = script.recognizer()?;
    drag.on_recognized(|d| {
        log::info!("Drag recognized at {} (started at {})", d.current_point(), d.start_point());
    });
    drag.on_complete(|d| {
        log::info!("Drag complete at {}", d.end_point());
    });

    let events = replay(&mut drag, &script.frames);
    for event in &events {
        println!(
            "frame {:>3}: {:?} -> {} at {}",
            event.frame, event.notification, event.state, event.location
        );
    }

    log::info!(
        "Replayed {} frames, {} notifications",
        script.frames.len(),
        events.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("touchkit error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
