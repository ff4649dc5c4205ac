//! Hand pointer application: steer the mouse with your index finger.

use anyhow::{Context, Result};
use clap::Parser;
use hand_pointer::{app::HandPointerApp, cli::Args, config::Config};
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Pointer");

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("Failed to load config file {}", path.display()))?
        }
        None => Config::default(),
    };
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let mut app = HandPointerApp::new(&config)?;
    let summary = app.run()?;
    info!("Stopped after {} frames, {} clicks", summary.cycles, summary.clicks);

    Ok(())
}
