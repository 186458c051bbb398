//! Command-line parsing for the SIE query tool.
//!
//! Parsing lives here; dispatch lives in `app` so the client stays free of
//! any CLI concerns.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_BASE_URL;
use crate::data::config::{BASE_URL_ENV, DEFAULT_TIMEOUT_SECS, TOKEN_ENV};
use crate::domain::Language;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sie", version, about = "Query the Economic Information System (SIE) API of Banco de México")]
pub struct Cli {
    /// Query token issued by Banco de México.
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Series ids, comma separated or repeated (e.g. SF43718,SF46410), or one range SF311408-SF311410.
    #[arg(short = 's', long, value_delimiter = ',', required = true)]
    pub series: Vec<String>,

    /// Language of titles and labels.
    #[arg(short = 'l', long, value_enum, default_value_t = Language::En)]
    pub lang: Language,

    /// Base URL of the SIE REST service.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Output-format hint forwarded as `mediaType`.
    #[arg(long)]
    pub media_type: Option<String>,

    /// Write the JSON response to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log request details to stderr (overridden by RUST_LOG).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Series metadata (title, coverage dates, periodicity, units).
    Metadata,
    /// Most recent published observation.
    Last(TransformArgs),
    /// Full history of the series.
    Series(TransformArgs),
    /// Observations between two dates (yyyy-mm-dd).
    Range(RangeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct TransformArgs {
    /// Percentage-change mode: PorcObsAnt (vs previous observation), PorcAnual (annual),
    /// PorcAcumAnual (annual accumulated). Omit for levels.
    #[arg(short = 'p', long)]
    pub pct_change: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// First date of the period (yyyy-mm-dd).
    pub start: String,

    /// Last date of the period (yyyy-mm-dd).
    pub end: String,

    #[command(flatten)]
    pub transform: TransformArgs,
}
