//! Settings for the Tapstream integration.
//!
//! The host hands integrations their settings as a camelCase JSON map
//! (`accountName`, `sdkSecret`, `trackAllPages`, ...). Standalone tools load
//! the same settings in layers: defaults -> config file -> env vars -> CLI
//! flags, with a default file at `~/.config/tapstream/config.toml`.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TypesError;
use crate::value_map::{ValueMap, ValueMapExt};

pub const ACCOUNT_NAME_KEY: &str = "accountName";
pub const SDK_SECRET_KEY: &str = "sdkSecret";
pub const TRACK_ALL_PAGES_KEY: &str = "trackAllPages";
pub const TRACK_CATEGORIZED_PAGES_KEY: &str = "trackCategorizedPages";
pub const TRACK_NAMED_PAGES_KEY: &str = "trackNamedPages";

/// Connection credentials and screen gates for Tapstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapstreamSettings {
    /// Tapstream account name. Validated by the SDK, not here.
    #[serde(default, alias = "accountName")]
    pub account_name: String,

    /// Tapstream SDK secret. Validated by the SDK, not here.
    #[serde(default, alias = "sdkSecret")]
    pub sdk_secret: String,

    /// Fire an event for every screen view
    #[serde(default = "default_track_pages", alias = "trackAllPages")]
    pub track_all_pages: bool,

    /// Fire an event for screen views that carry a category
    #[serde(default = "default_track_pages", alias = "trackCategorizedPages")]
    pub track_categorized_pages: bool,

    /// Fire an event for screen views that carry a name
    #[serde(default = "default_track_pages", alias = "trackNamedPages")]
    pub track_named_pages: bool,
}

fn default_track_pages() -> bool {
    true
}

impl Default for TapstreamSettings {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            sdk_secret: String::new(),
            track_all_pages: default_track_pages(),
            track_categorized_pages: default_track_pages(),
            track_named_pages: default_track_pages(),
        }
    }
}

impl TapstreamSettings {
    pub fn new(account_name: impl Into<String>, sdk_secret: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            sdk_secret: sdk_secret.into(),
            ..Default::default()
        }
    }

    /// Set all three screen gates at once.
    pub fn with_screen_gates(mut self, all: bool, categorized: bool, named: bool) -> Self {
        self.track_all_pages = all;
        self.track_categorized_pages = categorized;
        self.track_named_pages = named;
        self
    }

    /// Read settings from the host's settings map.
    ///
    /// Missing flags default to `true`. Missing credentials become empty
    /// strings and are left for the SDK to reject.
    pub fn from_value_map(settings: &ValueMap) -> Self {
        Self {
            account_name: settings.get_string(ACCOUNT_NAME_KEY).unwrap_or_default(),
            sdk_secret: settings.get_string(SDK_SECRET_KEY).unwrap_or_default(),
            track_all_pages: settings.get_bool(TRACK_ALL_PAGES_KEY, true),
            track_categorized_pages: settings.get_bool(TRACK_CATEGORIZED_PAGES_KEY, true),
            track_named_pages: settings.get_bool(TRACK_NAMED_PAGES_KEY, true),
        }
    }

    /// Render as the host's camelCase settings map.
    pub fn to_value_map(&self) -> ValueMap {
        ValueMap::new()
            .put_value(ACCOUNT_NAME_KEY, self.account_name.as_str())
            .put_value(SDK_SECRET_KEY, self.sdk_secret.as_str())
            .put_value(TRACK_ALL_PAGES_KEY, self.track_all_pages)
            .put_value(TRACK_CATEGORIZED_PAGES_KEY, self.track_categorized_pages)
            .put_value(TRACK_NAMED_PAGES_KEY, self.track_named_pages)
    }

    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/tapstream/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (TAPSTREAM_ACCOUNT_NAME, TAPSTREAM_TRACK_ALL_PAGES, ...)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TypesError> {
        let config_dir = ProjectDirs::from("", "", "tapstream")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("account_name", "")?
            .set_default("sdk_secret", "")?
            .set_default("track_all_pages", default_track_pages())?
            .set_default("track_categorized_pages", default_track_pages())?
            .set_default("track_named_pages", default_track_pages())?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("TAPSTREAM").try_parsing(true));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = TapstreamSettings::default();
        assert!(settings.track_all_pages);
        assert!(settings.track_categorized_pages);
        assert!(settings.track_named_pages);
        assert!(settings.account_name.is_empty());
    }

    #[test]
    fn test_from_value_map_reads_all_keys() {
        let map = ValueMap::new()
            .put_value("accountName", "foo")
            .put_value("sdkSecret", "bar")
            .put_value("trackAllPages", true)
            .put_value("trackCategorizedPages", false)
            .put_value("trackNamedPages", true);

        let settings = TapstreamSettings::from_value_map(&map);
        assert_eq!(settings.account_name, "foo");
        assert_eq!(settings.sdk_secret, "bar");
        assert!(settings.track_all_pages);
        assert!(!settings.track_categorized_pages);
        assert!(settings.track_named_pages);
    }

    #[test]
    fn test_from_value_map_flags_default_true() {
        let map = ValueMap::new().put_value("accountName", "foo");
        let settings = TapstreamSettings::from_value_map(&map);
        assert!(settings.track_all_pages);
        assert!(settings.track_categorized_pages);
        assert!(settings.track_named_pages);
        assert!(settings.sdk_secret.is_empty());
    }

    #[test]
    fn test_from_value_map_string_flags() {
        let map = ValueMap::new().put_value("trackAllPages", "false");
        let settings = TapstreamSettings::from_value_map(&map);
        assert!(!settings.track_all_pages);
    }

    #[test]
    fn test_value_map_roundtrip() {
        let settings = TapstreamSettings::new("foo", "bar").with_screen_gates(false, true, false);
        let parsed = TapstreamSettings::from_value_map(&settings.to_value_map());
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_deserialize_accepts_camel_case_aliases() {
        let json = r#"{"accountName":"foo","sdkSecret":"bar","trackNamedPages":false}"#;
        let settings: TapstreamSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.account_name, "foo");
        assert!(!settings.track_named_pages);
        assert!(settings.track_all_pages);
    }

    #[test]
    fn test_load_from_cli_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tapstream.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "account_name = \"acme\"").unwrap();
        writeln!(file, "sdk_secret = \"s3cret\"").unwrap();
        writeln!(file, "track_all_pages = false").unwrap();

        let settings = TapstreamSettings::load(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(settings.account_name, "acme");
        assert_eq!(settings.sdk_secret, "s3cret");
        assert!(!settings.track_all_pages);
        assert!(settings.track_categorized_pages);
    }

    #[test]
    fn test_load_missing_cli_file_fails() {
        let result = TapstreamSettings::load(Some("/nonexistent/tapstream.toml"));
        assert!(matches!(result, Err(TypesError::Config(_))));
    }
}
