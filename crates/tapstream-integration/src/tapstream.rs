//! Tapstream integration.
//!
//! Tapstream attributes app installs to the users who visited a website
//! first. This integration forwards track calls as Tapstream events, turns
//! screen views into `Viewed {X} Screen` events behind three gates, and
//! folds identify traits into the session's global event parameters.

use tapstream_types::{
    is_null_or_empty, Analytics, IdentifyPayload, Logger, ScreenPayload, TapstreamSettings,
    TrackPayload, ValueMap,
};

use crate::error::IntegrationError;
use crate::integration::{Integration, IntegrationFactory};
use crate::sdk::{AttributionClient, AttributionSdk, Event, SdkConfig, SdkLogger};

pub const TAPSTREAM_KEY: &str = "Tapstream";

fn viewed_event(screen: &str) -> String {
    format!("Viewed {screen} Screen")
}

/// Mirrors SDK log output at debug level.
#[derive(Debug, Default)]
pub struct TapstreamLogger;

impl SdkLogger for TapstreamLogger {
    fn log(&self, level: i32, message: &str) {
        tracing::debug!(target: "Tapstream", sdk_level = level, "{}", message);
    }
}

/// Forwards host calls to a Tapstream session.
#[derive(Debug)]
pub struct TapstreamIntegration<C> {
    track_all_pages: bool,
    track_categorized_pages: bool,
    track_named_pages: bool,
    client: C,
    config: SdkConfig,
    logger: Logger,
}

impl<C: AttributionClient> TapstreamIntegration<C> {
    /// Build the integration from the host's settings map.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Sdk` if the session cannot be created.
    pub fn new<S>(
        analytics: &Analytics,
        settings: &ValueMap,
        sdk: &S,
    ) -> Result<Self, IntegrationError>
    where
        S: AttributionSdk<Client = C>,
    {
        Self::with_settings(analytics, TapstreamSettings::from_value_map(settings), sdk)
    }

    /// Build the integration from already parsed settings.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Sdk` if the session cannot be created.
    pub fn with_settings<S>(
        analytics: &Analytics,
        settings: TapstreamSettings,
        sdk: &S,
    ) -> Result<Self, IntegrationError>
    where
        S: AttributionSdk<Client = C>,
    {
        let logger = analytics.logger(TAPSTREAM_KEY);
        if logger.log_level.log_calls() {
            sdk.set_logger(Box::new(TapstreamLogger));
        }

        let config = SdkConfig::new();
        let client = match sdk.create(
            analytics.application(),
            &settings.account_name,
            &settings.sdk_secret,
            &config,
        ) {
            Ok(client) => client,
            Err(e) => {
                logger.error(format!("Tapstream session failed: {e}"));
                return Err(e.into());
            }
        };
        logger.verbose(format!(
            "Tapstream.create(context, {}, <secret>, config)",
            settings.account_name
        ));
        logger.debug(format!(
            "screen gates: all={} categorized={} named={}",
            settings.track_all_pages, settings.track_categorized_pages, settings.track_named_pages
        ));

        Ok(Self {
            track_all_pages: settings.track_all_pages,
            track_categorized_pages: settings.track_categorized_pages,
            track_named_pages: settings.track_named_pages,
            client,
            config,
            logger,
        })
    }

    /// The SDK session events are fired into.
    pub fn underlying_instance(&self) -> &C {
        &self.client
    }

    /// Session configuration, including the accumulated global parameters.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn track_all_pages(&self) -> bool {
        self.track_all_pages
    }

    pub fn track_categorized_pages(&self) -> bool {
        self.track_categorized_pages
    }

    pub fn track_named_pages(&self) -> bool {
        self.track_named_pages
    }

    fn fire_event(&mut self, name: String, properties: &ValueMap) {
        let mut event = Event::new(name, false);
        for (key, value) in properties {
            event.add_pair(key.clone(), value.clone());
        }
        self.logger
            .verbose(format!("Tapstream.fireEvent({})", event.name()));
        self.client.fire_event(event, &self.config);
    }
}

impl<C: AttributionClient> Integration for TapstreamIntegration<C> {
    fn key(&self) -> &str {
        TAPSTREAM_KEY
    }

    fn track(&mut self, track: &TrackPayload) {
        self.fire_event(track.event.clone(), &track.properties);
    }

    fn screen(&mut self, screen: &ScreenPayload) {
        if self.track_all_pages {
            self.fire_event(viewed_event(&screen.event()), &screen.properties);
            return;
        }

        if self.track_categorized_pages && !is_null_or_empty(screen.category()) {
            let category = screen.category().unwrap_or_default();
            self.fire_event(viewed_event(category), &screen.properties);
            return;
        }

        if self.track_named_pages && !is_null_or_empty(screen.name()) {
            let name = screen.name().unwrap_or_default();
            self.fire_event(viewed_event(name), &screen.properties);
        }
    }

    fn identify(&mut self, identify: &IdentifyPayload) {
        for (key, value) in &identify.traits {
            self.config
                .global_event_params
                .insert(key.clone(), value.clone());
        }
        self.logger.verbose(format!(
            "Tapstream.globalEventParams += {} trait(s)",
            identify.traits.len()
        ));
    }
}

/// Creates [`TapstreamIntegration`]s backed by one SDK entry point.
pub struct TapstreamFactory<S> {
    sdk: S,
}

impl<S: AttributionSdk> TapstreamFactory<S> {
    pub fn new(sdk: S) -> Self {
        Self { sdk }
    }
}

impl<S> IntegrationFactory for TapstreamFactory<S>
where
    S: AttributionSdk,
    S::Client: 'static,
{
    fn key(&self) -> &str {
        TAPSTREAM_KEY
    }

    fn create(
        &self,
        settings: &ValueMap,
        analytics: &Analytics,
    ) -> Result<Box<dyn Integration>, IntegrationError> {
        let integration = TapstreamIntegration::new(analytics, settings, &self.sdk)?;
        Ok(Box::new(integration))
    }
}
