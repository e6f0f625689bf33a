//! The attribution SDK as seen by the integration.
//!
//! Transport, batching and retries live behind these traits. The integration
//! only creates a session, hands over events, and owns the [`SdkConfig`]
//! whose global parameters ride along with every fired event.

use serde::Serialize;
use serde_json::Value;

use tapstream_types::{Application, ValueMap};

use crate::error::SdkError;

/// Session configuration shared between the integration and the SDK.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SdkConfig {
    /// Parameters attached to every event fired after they are set.
    ///
    /// Grows for the lifetime of the session; nothing clears it.
    pub global_event_params: ValueMap,
}

impl SdkConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One outbound event.
///
/// Built fresh for each call and moved into the SDK client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    name: String,
    one_time_only: bool,
    pairs: Vec<(String, Value)>,
}

impl Event {
    pub fn new(name: impl Into<String>, one_time_only: bool) -> Self {
        Self {
            name: name.into(),
            one_time_only,
            pairs: Vec::new(),
        }
    }

    /// Append a key/value pair. Order is kept.
    pub fn add_pair(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the SDK should fire this event at most once per install.
    pub fn one_time_only(&self) -> bool {
        self.one_time_only
    }

    pub fn pairs(&self) -> &[(String, Value)] {
        &self.pairs
    }

    /// Parameters as delivered: global parameters first, then the event's
    /// own pairs, which win on key collisions.
    pub fn params(&self, config: &SdkConfig) -> ValueMap {
        let mut params = config.global_event_params.clone();
        for (key, value) in &self.pairs {
            params.insert(key.clone(), value.clone());
        }
        params
    }
}

/// Sink for the SDK's own diagnostic output.
pub trait SdkLogger: Send + Sync {
    fn log(&self, level: i32, message: &str);
}

/// A live SDK session.
pub trait AttributionClient {
    /// Hand an event to the SDK for delivery.
    fn fire_event(&mut self, event: Event, config: &SdkConfig);
}

/// Entry point of the attribution SDK.
pub trait AttributionSdk {
    type Client: AttributionClient;

    /// Install a sink for SDK log messages.
    fn set_logger(&self, logger: Box<dyn SdkLogger>);

    /// Open a session for the given account.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidCredentials` when the account name or secret
    /// is rejected, or `SdkError::Session` when the session cannot be set up.
    fn create(
        &self,
        application: &Application,
        account_name: &str,
        sdk_secret: &str,
        config: &SdkConfig,
    ) -> Result<Self::Client, SdkError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tapstream_types::ValueMapExt;

    #[test]
    fn test_event_keeps_pair_order() {
        let mut event = Event::new("purchase", false);
        event.add_pair("sku", "A-1");
        event.add_pair("price", 9.99);
        event.add_pair("qty", 2);

        let keys: Vec<&str> = event.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["sku", "price", "qty"]);
        assert!(!event.one_time_only());
        assert_eq!(event.name(), "purchase");
    }

    #[test]
    fn test_params_merge_globals_first() {
        let mut config = SdkConfig::new();
        config.global_event_params = ValueMap::new()
            .put_value("plan", "free")
            .put_value("region", "eu");

        let mut event = Event::new("upgrade", false);
        event.add_pair("plan", "pro");

        let params = event.params(&config);
        assert_eq!(params.get("plan"), Some(&json!("pro")));
        assert_eq!(params.get("region"), Some(&json!("eu")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_event_serializes() {
        let mut event = Event::new("foo", false);
        event.add_pair("k", "v");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["name"], json!("foo"));
        assert_eq!(value["pairs"], json!([["k", "v"]]));
    }
}
