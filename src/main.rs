//! Process entry point: parses the CLI, loads configuration, and runs the
//! driver loop until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use sci_snmp_bridge::config::BridgeConfig;
use sci_snmp_bridge::driver;

/// Unidirectional SCI-to-SNMP protocol bridge.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, default_value = "config.ini")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = BridgeConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let shutdown = Arc::new(AtomicBool::new(false));
    register_signal_handlers(&shutdown).context("registering signal handlers")?;

    driver::run(&config, shutdown)?;
    Ok(())
}

fn register_signal_handlers(shutdown: &Arc<AtomicBool>) -> std::io::Result<()> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::flag;

    flag::register(SIGINT, Arc::clone(shutdown))?;
    flag::register(SIGTERM, Arc::clone(shutdown))?;
    flag::register(SIGHUP, Arc::clone(shutdown))?;
    Ok(())
}
