//! Payloads delivered by the host analytics client.
//!
//! Each lifecycle call (track, screen, identify, alias, group) carries one of
//! these. They arrive as camelCase JSON tagged by `"type"` and are read-only
//! to integrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::value_map::{is_null_or_empty, ValueMap};

fn new_message_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Fields shared by every payload type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePayload {
    /// Unique identifier (ULID string unless the host supplied one)
    #[serde(default = "new_message_id")]
    pub message_id: String,

    /// Anonymous identifier of the device/user
    #[serde(default)]
    pub anonymous_id: Option<String>,

    /// Identified user, once known
    #[serde(default)]
    pub user_id: Option<String>,

    /// When the call was made on the host
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Device/app context captured by the host
    #[serde(default)]
    pub context: ValueMap,
}

impl Default for BasePayload {
    fn default() -> Self {
        Self {
            message_id: new_message_id(),
            anonymous_id: None,
            user_id: None,
            timestamp: None,
            context: ValueMap::new(),
        }
    }
}

/// A custom event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPayload {
    #[serde(flatten)]
    pub base: BasePayload,

    /// Event name, e.g. "Order Completed"
    pub event: String,

    #[serde(default)]
    pub properties: ValueMap,
}

impl TrackPayload {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            base: BasePayload::default(),
            event: event.into(),
            properties: ValueMap::new(),
        }
    }

    /// Replace the property map.
    pub fn with_properties(mut self, properties: ValueMap) -> Self {
        self.properties = properties;
        self
    }
}

/// A screen view. Either `name`, `category`, or both may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPayload {
    #[serde(flatten)]
    pub base: BasePayload,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub properties: ValueMap,
}

impl ScreenPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the screen category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the property map.
    pub fn with_properties(mut self, properties: ValueMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Display name of the screen view: the name, or the category when the
    /// name is empty.
    pub fn event(&self) -> String {
        if is_null_or_empty(self.name()) {
            return self.category().unwrap_or_default().to_string();
        }
        self.name().unwrap_or_default().to_string()
    }
}

/// Ties a user to their traits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyPayload {
    #[serde(flatten)]
    pub base: BasePayload,

    #[serde(default)]
    pub traits: ValueMap,
}

impl IdentifyPayload {
    pub fn new(traits: ValueMap) -> Self {
        Self {
            base: BasePayload::default(),
            traits,
        }
    }
}

/// Merges a previous identity into the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasPayload {
    #[serde(flatten)]
    pub base: BasePayload,

    #[serde(default)]
    pub previous_id: Option<String>,
}

/// Associates the user with a group/account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    #[serde(flatten)]
    pub base: BasePayload,

    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub traits: ValueMap,
}

/// Any payload the host can route to an integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Track(TrackPayload),
    Screen(ScreenPayload),
    Identify(IdentifyPayload),
    Alias(AliasPayload),
    Group(GroupPayload),
}

impl Payload {
    /// Decode a single host payload from JSON.
    pub fn from_json(json: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The payload's `"type"` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Track(_) => "track",
            Payload::Screen(_) => "screen",
            Payload::Identify(_) => "identify",
            Payload::Alias(_) => "alias",
            Payload::Group(_) => "group",
        }
    }

    pub fn base(&self) -> &BasePayload {
        match self {
            Payload::Track(p) => &p.base,
            Payload::Screen(p) => &p.base,
            Payload::Identify(p) => &p.base,
            Payload::Alias(p) => &p.base,
            Payload::Group(p) => &p.base,
        }
    }
}
