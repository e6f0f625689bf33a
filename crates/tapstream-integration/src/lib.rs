//! # tapstream-integration
//!
//! Forwards host analytics calls to the Tapstream attribution SDK.
//!
//! ## Core Components
//!
//! - [`Integration`]: Lifecycle hooks the host drives, all no-ops by default
//! - [`IntegrationFactory`]: Builds an integration from host settings
//! - [`AttributionSdk`] / [`AttributionClient`]: The SDK seam
//! - [`TapstreamIntegration`]: Maps track, screen and identify onto Tapstream
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tapstream_integration::{IntegrationFactory, TapstreamFactory};
//! use tapstream_types::{Analytics, Application, LogLevel, Payload, TapstreamSettings};
//!
//! let factory = TapstreamFactory::new(MySdk::default());
//! let analytics = Analytics::new(Application::new("com.example.app"), LogLevel::Info);
//! let settings = TapstreamSettings::new("account", "secret").to_value_map();
//!
//! let mut integration = factory.create(&settings, &analytics)?;
//! integration.dispatch(&Payload::from_json(r#"{"type":"screen","name":"Home"}"#)?);
//! // fires "Viewed Home Screen"
//! ```

pub mod error;
pub mod integration;
pub mod sdk;
pub mod tapstream;

// Re-export main types at crate root
pub use error::{IntegrationError, SdkError};
pub use integration::{Integration, IntegrationFactory};
pub use sdk::{AttributionClient, AttributionSdk, Event, SdkConfig, SdkLogger};
pub use tapstream::{TapstreamFactory, TapstreamIntegration, TapstreamLogger, TAPSTREAM_KEY};
