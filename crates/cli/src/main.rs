use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use folio_cli::Cli;
use folio_core::config::{AppConfig, LoggingConfig};

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    use folio_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = logging.level.trim().parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(io::stderr);

    let installed = match logging.format {
        Compact => builder.compact().try_init(),
        Pretty => builder.pretty().try_init(),
        Json => builder.json().try_init(),
    };
    installed.map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Broken config is reported by the command itself, so logging falls back to defaults here.
    let logging = AppConfig::load(cli.globals.load_options())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging)?;

    let result = folio_cli::execute(cli);
    println!("{}", result.output);
    Ok(ExitCode::from(result.exit_code))
}
