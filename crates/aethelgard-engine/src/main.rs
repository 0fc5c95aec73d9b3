//! # Aethelgard Engine
//!
//! Headless host for the Aethelgard simulation core.
//!
//! This binary ties the pieces together:
//! - Config: `aethelgard.toml`, including the `[simulation]` tuning
//! - Store: the reference host state the simulation reports into
//! - App: the frame loop and the autopilot that plays it
//!
//! Usage: `aethelgard [CONFIG_PATH]` runs a session;
//! `aethelgard --init [CONFIG_PATH]` writes a default config file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod render;
mod store;
mod timing;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1).peekable();
    if args.peek().is_some_and(|arg| arg == "--init") {
        let path = args.nth(1).map_or_else(EngineConfig::config_path, Into::into);
        EngineConfig::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = match args.next() {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    config.validate();

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::registry()
        .with(config.json_logs.then(|| fmt::layer().json()))
        .with((!config.json_logs).then(fmt::layer))
        .with(filter)
        .init();

    info!("Aethelgard starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("  Start zone: {}", config.start_zone);
    info!("  Class: {:?}", config.player_class);
    info!(
        "  Frames: {} at {} fps ({})",
        config.max_frames,
        config.target_fps,
        if config.fixed_timestep { "fixed" } else { "wall clock" }
    );

    let summary = app::run(config)?;

    info!(
        kills = summary.kills,
        gold = summary.gold,
        level = summary.level,
        deaths = summary.deaths,
        game_over = summary.game_over,
        "Aethelgard shutdown complete"
    );
    Ok(())
}
