//! CLI argument definitions for the TM2 Bridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tm2",
    version,
    about = "TM2 Bridge - map clinical text to NAMASTE and ICD-11/TM2 codes",
    long_about = "Map free-text clinical input to NAMASTE traditional-medicine codes\n\
                  and their ICD-11/TM2 equivalents.\n\n\
                  Matching runs against a validated keyword table; when the table has\n\
                  no match, an optional remote AI service is consulted once before a\n\
                  generic fallback is returned."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Allow clinical free text to appear in log output.
    ///
    /// Queries are treated as potential PHI and redacted from logs unless
    /// this flag is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest code mappings, with remote fallback when configured.
    Suggest(SuggestArgs),

    /// Match against the local keyword table only (instant-feedback path).
    Match(MatchArgs),

    /// Validate a mapping table and show its statistics.
    Table(TableArgs),
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Clinical free text to map.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Mapping table JSON file (default: the built-in table).
    #[arg(long = "table", value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Base URL of the remote suggestion service.
    #[arg(long = "remote-url", value_name = "URL")]
    pub remote_url: Option<String>,

    /// API key for the remote service (falls back to TM2_API_KEY).
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Remote request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECONDS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Emit JSON instead of a rendered table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Clinical free text to match.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Mapping table JSON file (default: the built-in table).
    #[arg(long = "table", value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Emit JSON instead of a rendered table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct TableArgs {
    /// Mapping table JSON file (default: the built-in table).
    #[arg(long = "table", value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Emit JSON instead of a rendered table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
