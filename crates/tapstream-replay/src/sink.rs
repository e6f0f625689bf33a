//! Attribution SDK stand-in that writes fired events as JSON lines.

use serde::Serialize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tapstream_integration::{
    AttributionClient, AttributionSdk, Event, SdkConfig, SdkError, SdkLogger,
};
use tapstream_types::{Application, ValueMap};

// SDK log priorities
const LOG_INFO: i32 = 4;
const LOG_WARN: i32 = 5;

type SharedLogger = Arc<Mutex<Option<Box<dyn SdkLogger>>>>;

/// One output line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FiredRecord<'a> {
    name: &'a str,
    one_time_only: bool,
    params: ValueMap,
}

/// SDK entry point writing to `W`.
///
/// Clones share the writer, the installed logger and the fired counter.
pub struct JsonLinesSdk<W> {
    out: Arc<Mutex<W>>,
    logger: SharedLogger,
    fired: Arc<AtomicUsize>,
}

impl<W> Clone for JsonLinesSdk<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            logger: Arc::clone(&self.logger),
            fired: Arc::clone(&self.fired),
        }
    }
}

impl<W: Write> JsonLinesSdk<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            logger: Arc::new(Mutex::new(None)),
            fired: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of events written so far.
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::Relaxed)
    }

    /// Lock the underlying writer.
    pub fn output(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, record: &FiredRecord<'_>) -> io::Result<()> {
        let mut out = self.output();
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)
    }
}

fn sdk_log(logger: &SharedLogger, level: i32, message: &str) {
    let guard = logger.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = guard.as_ref() {
        logger.log(level, message);
    }
}

impl<W: Write> AttributionSdk for JsonLinesSdk<W> {
    type Client = JsonLinesClient<W>;

    fn set_logger(&self, logger: Box<dyn SdkLogger>) {
        *self.logger.lock().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    }

    fn create(
        &self,
        application: &Application,
        account_name: &str,
        sdk_secret: &str,
        _config: &SdkConfig,
    ) -> Result<Self::Client, SdkError> {
        if account_name.trim().is_empty() {
            return Err(SdkError::invalid_credentials("account name is empty"));
        }
        if sdk_secret.trim().is_empty() {
            return Err(SdkError::invalid_credentials("sdk secret is empty"));
        }

        sdk_log(
            &self.logger,
            LOG_INFO,
            &format!(
                "session created for account {account_name} ({})",
                application.package_name
            ),
        );

        Ok(JsonLinesClient {
            sdk: self.clone(),
        })
    }
}

/// Session handed to the integration.
pub struct JsonLinesClient<W> {
    sdk: JsonLinesSdk<W>,
}

impl<W: Write> AttributionClient for JsonLinesClient<W> {
    fn fire_event(&mut self, event: Event, config: &SdkConfig) {
        let record = FiredRecord {
            name: event.name(),
            one_time_only: event.one_time_only(),
            params: event.params(config),
        };

        match self.sdk.write_record(&record) {
            Ok(()) => {
                self.sdk.fired.fetch_add(1, Ordering::Relaxed);
                sdk_log(&self.sdk.logger, LOG_INFO, &format!("fired event {}", event.name()));
            }
            Err(e) => {
                tracing::warn!(event = event.name(), error = %e, "Failed to write fired event");
                sdk_log(&self.sdk.logger, LOG_WARN, &format!("dropped event {}", event.name()));
            }
        }
    }
}
