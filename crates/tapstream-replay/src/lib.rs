//! Tapstream replay library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Settings resolution and the replay loop
//! - `sink`: SDK stand-in writing fired events as JSON lines

pub mod cli;
pub mod commands;
pub mod sink;

pub use cli::Cli;
pub use commands::{replay, replay_lines, resolve_settings, run, ReplayStats};
pub use sink::{JsonLinesClient, JsonLinesSdk};
