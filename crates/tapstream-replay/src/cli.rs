//! CLI argument parsing for the replay tool.
//!
//! Flags override the config file and environment.

use clap::Parser;
use std::path::PathBuf;

use tapstream_types::LogLevel;

/// Tapstream payload replay
///
/// Reads one host payload per line (JSON) and prints every event the
/// Tapstream integration fires as a JSON line.
#[derive(Parser, Debug)]
#[command(name = "tapstream-replay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/tapstream/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Host log level handed to the integration (none, info, debug, basic, verbose)
    #[arg(long, default_value = "none")]
    pub host_log_level: LogLevel,

    /// Payload file to replay (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override Tapstream account name
    #[arg(long)]
    pub account_name: Option<String>,

    /// Override Tapstream SDK secret
    #[arg(long)]
    pub sdk_secret: Option<String>,

    /// Application package name reported to the SDK
    #[arg(long, default_value = "tapstream-replay")]
    pub package_name: String,
}
