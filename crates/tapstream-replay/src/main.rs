//! Tapstream payload replay.
//!
//! Reads host analytics payloads (one JSON object per line), pushes them
//! through the Tapstream integration and prints every fired event.
//!
//! # Usage
//!
//! ```bash
//! echo '{"type":"screen","name":"Home"}' | tapstream-replay --account-name acme --sdk-secret s3cret
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/tapstream/config.toml)
//! 3. Environment variables (TAPSTREAM_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use tapstream_replay::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}
