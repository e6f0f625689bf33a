//! Handles the host analytics client passes to integrations.
//!
//! An integration never owns the host. It receives an [`Analytics`] handle at
//! construction time to look up the application context and to obtain a
//! logger scoped to its own key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::value_map::ValueMap;

/// Host log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging
    #[default]
    None,
    /// Log the calls the integration receives
    Info,
    /// Log integration internals
    Debug,
    /// Basic request logging
    Basic,
    /// Everything
    Verbose,
}

impl LogLevel {
    /// Whether integrations should echo their calls at this level.
    pub fn log_calls(self) -> bool {
        matches!(self, LogLevel::Info | LogLevel::Verbose)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "none"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Basic => write!(f, "basic"),
            LogLevel::Verbose => write!(f, "verbose"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "basic" => Ok(LogLevel::Basic),
            "verbose" => Ok(LogLevel::Verbose),
            other => Err(TypesError::invalid_input(format!(
                "unknown log level '{other}'"
            ))),
        }
    }
}

/// Logger scoped to one integration key.
///
/// Messages go out through `tracing` with the tag as a field, and only when
/// the host log level allows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    pub tag: String,
    pub log_level: LogLevel,
}

impl Logger {
    pub fn new(tag: impl Into<String>, log_level: LogLevel) -> Self {
        Self {
            tag: tag.into(),
            log_level,
        }
    }

    /// Log a call the integration handled. Emitted at `Info` and `Verbose`.
    pub fn verbose(&self, message: impl fmt::Display) {
        if self.log_level.log_calls() {
            tracing::info!(tag = %self.tag, "{}", message);
        }
    }

    /// Log integration internals. Emitted at `Debug` and `Verbose`.
    pub fn debug(&self, message: impl fmt::Display) {
        if matches!(self.log_level, LogLevel::Debug | LogLevel::Verbose) {
            tracing::debug!(tag = %self.tag, "{}", message);
        }
    }

    /// Errors are always emitted unless logging is off.
    pub fn error(&self, message: impl fmt::Display) {
        if self.log_level != LogLevel::None {
            tracing::error!(tag = %self.tag, "{}", message);
        }
    }
}

/// The host application an integration runs inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Application package / bundle identifier
    pub package_name: String,
}

impl Application {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }
}

/// A UI activity whose lifecycle the host forwards to integrations.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    /// Saved instance state, when the host supplies one
    pub state: Option<ValueMap>,
}

impl Activity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: None,
        }
    }
}

/// Host analytics client as seen by an integration.
#[derive(Debug, Clone)]
pub struct Analytics {
    application: Application,
    log_level: LogLevel,
}

impl Analytics {
    pub fn new(application: Application, log_level: LogLevel) -> Self {
        Self {
            application,
            log_level,
        }
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Logger for the integration registered under `tag`.
    pub fn logger(&self, tag: &str) -> Logger {
        Logger::new(tag, self.log_level)
    }
}
