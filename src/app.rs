//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - builds the SIE client and runs one query
//! - prints or writes the JSON response

use std::time::Duration;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, Command};
use crate::data::{ClientConfig, SieClient, Transport};
use crate::data::config::TOKEN_ENV;
use crate::error::AppError;

/// Entry point for the `sie` binary.
pub fn run() -> Result<(), AppError> {
    // Before parsing, so clap's `env` fallbacks see values from `.env`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config_from_cli(&cli);
    let token = cli
        .token
        .clone()
        .ok_or_else(|| AppError::new(2, format!("Missing query token: pass --token or set {TOKEN_ENV} (.env).")))?;
    let client = SieClient::with_config(config, token, &cli.series, cli.lang)?;

    let response = execute(&client, &cli.command)?;

    match &cli.output {
        Some(path) => crate::io::write_response_json(path, &response)?,
        None => println!("{}", crate::io::format_response_json(&response)),
    }
    Ok(())
}

/// Run a single subcommand against `client`.
pub fn execute<T: Transport>(client: &SieClient<T>, command: &Command) -> Result<Value, AppError> {
    let response = match command {
        Command::Metadata => client.get_metadata()?,
        Command::Last(args) => client.get_last_data(args.pct_change.as_deref())?,
        Command::Series(args) => client.get_timeseries(args.pct_change.as_deref())?,
        Command::Range(args) => {
            client.get_timeseries_range(&args.start, &args.end, args.transform.pct_change.as_deref())?
        }
    };
    Ok(response)
}

pub fn config_from_cli(cli: &Cli) -> ClientConfig {
    let mut config =
        ClientConfig::new(cli.base_url.trim()).with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(media_type) = &cli.media_type {
        config = config.with_media_type(media_type.clone());
    }
    config
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,sie_banxico=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so stdout stays pure JSON.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
