//! Hex Bounce headless runner
//!
//! Runs the simulation for a fixed number of ticks and prints the final
//! frame as JSON. Drawing is left to whatever reads that output.
//!
//! Usage: `hex-bounce [--ticks N] [--seed S] [--config PATH]`

use std::process::ExitCode;

use hex_bounce::{SimState, Settings};

const DEFAULT_TICKS: u32 = 600;
const DEFAULT_SEED: u64 = 42;

struct Args {
    ticks: u32,
    seed: u64,
    config: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        ticks: DEFAULT_TICKS,
        seed: DEFAULT_SEED,
        config: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--ticks" => {
                let v = value()?;
                args.ticks = v.parse().map_err(|e| format!("bad --ticks {v:?}: {e}"))?;
            }
            "--seed" => {
                let v = value()?;
                args.seed = v.parse().map_err(|e| format!("bad --seed {v:?}: {e}"))?;
            }
            "--config" => args.config = Some(value()?),
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    log::info!("Hex Bounce starting: {} ticks, seed {}", args.ticks, args.seed);
    let mut state = match SimState::try_new(settings, args.seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    state.step_n(args.ticks);

    let stats = state.stats();
    log::info!(
        "Done after {} ticks: {} collisions, {} resets, final speed {:.2}",
        state.time_ticks(),
        stats.collisions,
        stats.resets,
        state.body().speed()
    );

    match serde_json::to_string_pretty(&state.frame()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize frame: {e}");
            ExitCode::FAILURE
        }
    }
}
