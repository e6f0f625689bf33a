//! # tapstream-types
//!
//! Host-side types for the Tapstream integration.
//!
//! This crate defines what an integration receives from the host analytics
//! client:
//! - Payloads: track, screen, identify, alias and group calls
//! - Value maps: loosely typed properties, traits and settings
//! - Analytics: application context and per-integration loggers
//! - Settings: Tapstream credentials and screen gates
//!
//! ## Usage
//!
//! ```rust
//! use tapstream_types::{Payload, ScreenPayload};
//!
//! let payload = Payload::from_json(r#"{"type":"screen","name":"Home"}"#).unwrap();
//! assert_eq!(payload.kind(), "screen");
//!
//! let screen = ScreenPayload::new().with_category("Feed").with_name("Home");
//! assert_eq!(screen.event(), "Home");
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod payload;
pub mod value_map;

pub use analytics::{Activity, Analytics, Application, LogLevel, Logger};
pub use crate::config::TapstreamSettings;
pub use error::TypesError;
pub use payload::{
    AliasPayload, BasePayload, GroupPayload, IdentifyPayload, Payload, ScreenPayload,
    TrackPayload,
};
pub use value_map::{is_null_or_empty, ValueMap, ValueMapExt};
