//! Persisted data model
//!
//! Field names follow the JSON document read by the statistics dashboard
//! (`flashCount`, `lastDeviceId`, ...), so every struct is camelCase on the
//! wire. Keys this version does not know about are kept in `extra` and written
//! back untouched.

use crate::constants::{MAX_EVENTS, SNAPSHOT_VERSION, UNKNOWN_VERSION};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Renders a timestamp as RFC 3339 with microseconds and an explicit `+00:00`
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Per-device counters and status, keyed by display name in [`Snapshot::devices`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(default)]
    pub flash_count: u64,
    #[serde(default)]
    pub erase_count: u64,
    #[serde(default)]
    pub last_seen: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub last_device_id: String,
    #[serde(default = "unknown_version")]
    pub app_version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unknown_version() -> String {
    UNKNOWN_VERSION.to_string()
}

impl DeviceRecord {
    /// A fresh record first seen on `device_id` at `seen_at`
    #[must_use]
    pub fn new(device_id: impl Into<String>, seen_at: impl Into<String>) -> Self {
        Self {
            flash_count: 0,
            erase_count: 0,
            last_seen: seen_at.into(),
            online: false,
            last_device_id: device_id.into(),
            app_version: unknown_version(),
            extra: Map::new(),
        }
    }
}

/// Event category
///
/// The set is open: unrecognised tags read from disk are carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Flash,
    Erase,
    Info,
    Other(String),
}

impl EventKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Flash => "flash",
            EventKind::Erase => "erase",
            EventKind::Info => "info",
            EventKind::Other(tag) => tag,
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "flash" => EventKind::Flash,
            "erase" => EventKind::Erase,
            "info" => EventKind::Info,
            _ => EventKind::Other(tag),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the recent-events log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    #[must_use]
    pub fn new(
        kind: EventKind,
        message: impl Into<String>,
        device_name: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            device_name: device_name.into(),
            timestamp: timestamp.into(),
            extra: Map::new(),
        }
    }
}

/// The JSON document written at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceRecord>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub last_update: String,
    #[serde(default = "snapshot_version")]
    pub version: String,
}

fn snapshot_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

impl Snapshot {
    /// Builds a snapshot stamped `last_update`, truncating events to [`MAX_EVENTS`]
    #[must_use]
    pub fn new(
        devices: BTreeMap<String, DeviceRecord>,
        mut events: Vec<Event>,
        last_update: impl Into<String>,
    ) -> Self {
        events.truncate(MAX_EVENTS);
        Self {
            devices,
            events,
            last_update: last_update.into(),
            version: snapshot_version(),
        }
    }
}
