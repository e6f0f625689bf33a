//! Integration trait definition.
//!
//! The `Integration` trait is the surface the host analytics client drives.
//! Every hook defaults to a no-op, so an integration only overrides the calls
//! it forwards.

use tapstream_types::{
    Activity, AliasPayload, Analytics, GroupPayload, IdentifyPayload, Payload, ScreenPayload,
    TrackPayload, ValueMap,
};

use crate::error::IntegrationError;

/// Trait for host-driven integrations.
///
/// Handlers run to completion on the caller's thread and take `&mut self`.
/// Sharing one integration across threads needs external synchronization,
/// e.g. a `Mutex` around it.
///
/// # Example
///
/// ```rust
/// use tapstream_integration::Integration;
/// use tapstream_types::{Payload, TrackPayload};
///
/// #[derive(Default)]
/// struct Counter {
///     tracked: usize,
/// }
///
/// impl Integration for Counter {
///     fn key(&self) -> &str {
///         "Counter"
///     }
///
///     fn track(&mut self, _track: &TrackPayload) {
///         self.tracked += 1;
///     }
/// }
///
/// let mut counter = Counter::default();
/// counter.dispatch(&Payload::Track(TrackPayload::new("foo")));
/// counter.dispatch_json(r#"{"type":"alias","previousId":"old"}"#).unwrap();
/// assert_eq!(counter.tracked, 1);
/// ```
pub trait Integration {
    /// Key the host registers this integration under (e.g. "Tapstream").
    fn key(&self) -> &str;

    fn on_activity_created(&mut self, _activity: &Activity, _saved_state: Option<&ValueMap>) {}

    fn on_activity_started(&mut self, _activity: &Activity) {}

    fn on_activity_resumed(&mut self, _activity: &Activity) {}

    fn on_activity_paused(&mut self, _activity: &Activity) {}

    fn on_activity_stopped(&mut self, _activity: &Activity) {}

    fn on_activity_save_instance_state(&mut self, _activity: &Activity, _out_state: &ValueMap) {}

    fn on_activity_destroyed(&mut self, _activity: &Activity) {}

    fn identify(&mut self, _identify: &IdentifyPayload) {}

    fn group(&mut self, _group: &GroupPayload) {}

    fn track(&mut self, _track: &TrackPayload) {}

    fn alias(&mut self, _alias: &AliasPayload) {}

    fn screen(&mut self, _screen: &ScreenPayload) {}

    /// Flush anything the integration buffers.
    fn flush(&mut self) {}

    /// Forget the current user.
    fn reset(&mut self) {}

    /// Route a payload to the matching hook.
    fn dispatch(&mut self, payload: &Payload) {
        match payload {
            Payload::Track(track) => self.track(track),
            Payload::Screen(screen) => self.screen(screen),
            Payload::Identify(identify) => self.identify(identify),
            Payload::Alias(alias) => self.alias(alias),
            Payload::Group(group) => self.group(group),
        }
    }

    /// Decode a JSON payload and route it.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Types` if the JSON is not a known payload.
    fn dispatch_json(&mut self, json: &str) -> Result<(), IntegrationError> {
        let payload = Payload::from_json(json)?;
        self.dispatch(&payload);
        Ok(())
    }
}

/// Builds an integration from host settings.
pub trait IntegrationFactory {
    /// Key of the integrations this factory builds.
    fn key(&self) -> &str;

    /// Create an integration.
    ///
    /// # Errors
    ///
    /// Propagates whatever the integration's construction fails with.
    fn create(
        &self,
        settings: &ValueMap,
        analytics: &Analytics,
    ) -> Result<Box<dyn Integration>, IntegrationError>;
}
