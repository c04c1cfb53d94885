mod alert;
mod config;
mod pointer;
mod predict;
mod tracker;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

use crate::config::Config;
use crate::pointer::PointerClient;
use crate::predict::{GroundStation, TleSource};
use crate::tracker::{Tracker, TrackerSettings};

#[derive(Parser)]
#[command(name = "pass-pointer")]
#[command(about = "Satellite pass tracking for a networked alt/az pointer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check { config: String },
    /// Track passes and drive the pointer
    Run { config: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => check(&config),
        Commands::Run { config } => run(&config),
    }
}

fn check(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let site = match GroundStation::from_config(&config.station) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Config is valid: site {:.4}°, {:.4}° at {} m (horizon {}°)",
        site.latitude_deg, site.longitude_deg, site.altitude_m, site.horizon_deg
    );
    println!(
        "Pointer at {} ({} steps/rev), TLE from {}",
        config.pointer.base_url, config.pointer.steps_per_revolution, config.tle.url
    );
    ExitCode::SUCCESS
}

fn run(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let site = match GroundStation::from_config(&config.station) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match TleSource::new(
        config.tle.url.clone(),
        Duration::from_secs(config.tle.request_timeout_s),
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("TLE source error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match PointerClient::from_config(&config.pointer) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Pointer client error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let announcer = alert::from_config(&config.alert);
    let settings = TrackerSettings::from_config(&config);

    if let Some(name) = &config.station.name {
        log::info!("station: {name}");
    }

    let mut tracker = Tracker::new(
        site,
        settings,
        Box::new(source),
        Box::new(client),
        announcer,
    );
    tracker.run()
}
