//! Message reducer
//!
//! Turns one `(topic, payload)` pair into store mutations. The topic is
//! classified first (see [`crate::topic::classify`]) and exactly one reduce
//! function runs per kind. Errors are returned to the caller, which logs them
//! and carries on with the next message.

use crate::constants::events::{
    DEVICE_ONLINE, ERASE_SUCCESS, FLASH_SUCCESS, OP_ERASE, OP_FLASH, SERIAL_CONNECTED,
    STATE_ONLINE,
};
use crate::error::MessageError;
use crate::store::StateStore;
use crate::topic::{classify, TopicKind};
use crate::types::EventKind;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

pub type ReduceResult = std::result::Result<Applied, MessageError>;

/// Whether a message changed the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Mutated,
    Ignored,
}

/// Reducer switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReducerOptions {
    /// Count a serial `disconnected` transition as one completed flash
    ///
    /// This can double-count an operation that was also reported on the stats
    /// or count topics.
    pub count_disconnect_as_flash: bool,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            count_disconnect_as_flash: true,
        }
    }
}

/// Last counter value seen per `(device_id, session_id)` during this run
#[derive(Debug, Default)]
pub struct SessionCounts {
    last: HashMap<(String, String), u64>,
}

impl SessionCounts {
    /// Records `value` and returns how far it advanced past the previous one
    ///
    /// The first value for a pair is a baseline and yields 0, as does a
    /// repeated or lower value. The stored value always becomes `value`, so a
    /// counter that restarts is tracked from its new base.
    pub fn observe(&mut self, device_id: &str, session_id: &str, value: u64) -> u64 {
        let previous = self
            .last
            .insert((device_id.to_string(), session_id.to_string()), value);
        previous.map_or(0, |prev| value.saturating_sub(prev))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    #[serde(default)]
    device_name: Option<String>,
    #[serde(default)]
    app_version: Option<String>,
    #[serde(default)]
    event: String,
}

/// Routes messages under one topic prefix to the per-kind reduce functions
#[derive(Debug)]
pub struct Reducer {
    prefix: String,
    options: ReducerOptions,
    counts: SessionCounts,
}

impl Reducer {
    #[must_use]
    pub fn new(prefix: impl Into<String>, options: ReducerOptions) -> Self {
        Self {
            prefix: prefix.into(),
            options,
            counts: SessionCounts::default(),
        }
    }

    /// Applies one message to `store`
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] when the topic is malformed or the payload
    /// cannot be decoded for its topic kind. The store is not modified in
    /// that case.
    pub fn apply(
        &mut self,
        store: &mut StateStore,
        topic: &str,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> ReduceResult {
        let kind = classify(&self.prefix, topic);
        match kind {
            TopicKind::Unrouted => {
                debug!(topic = %topic, "Ignoring unrouted topic");
                return Ok(Applied::Ignored);
            }
            TopicKind::Malformed => {
                return Err(MessageError::MalformedTopic(topic.to_string()));
            }
            _ => {}
        }

        let payload = std::str::from_utf8(payload).map_err(|_| MessageError::InvalidUtf8)?;
        debug!(topic = %topic, kind = kind.label(), "Reducing message");

        match kind {
            TopicKind::Stats {
                device_id,
                operation,
            } => reduce_stats(store, device_id, operation, payload, now),
            TopicKind::Count {
                device_id,
                session_id,
            } => reduce_count(store, &mut self.counts, device_id, session_id, payload, now),
            TopicKind::SerialStatus { device_id, .. } => {
                reduce_serial_status(store, self.options, device_id, payload, now)
            }
            TopicKind::Status { device_id, state } => reduce_status(store, device_id, state, now),
            TopicKind::Info { device_id, .. } => reduce_info(store, device_id, payload, now),
            TopicKind::Malformed | TopicKind::Unrouted => Ok(Applied::Ignored),
        }
    }
}

fn placeholder_name(device_id: &str) -> String {
    format!("Device {device_id}")
}

/// `{prefix}/stats/{device_id}/{operation}` with a JSON body
pub fn reduce_stats(
    store: &mut StateStore,
    device_id: &str,
    operation: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> ReduceResult {
    let stats: StatsPayload =
        serde_json::from_str(payload).map_err(|e| MessageError::InvalidJson(e.to_string()))?;

    let name = stats
        .device_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| placeholder_name(device_id));

    let record = store.upsert_device(&name, device_id, now);
    if let Some(version) = stats.app_version.filter(|v| !v.is_empty()) {
        record.app_version = version;
    }

    match (operation, stats.event.as_str()) {
        (OP_FLASH, FLASH_SUCCESS) => {
            record.flash_count = record.flash_count.saturating_add(1);
            let count = record.flash_count;
            store.record_event(
                EventKind::Flash,
                format!("{name} completed flash operation"),
                &name,
                now,
            );
            info!(device = %name, flash_count = count, "📊 Flash recorded");
        }
        (OP_ERASE, ERASE_SUCCESS) => {
            record.erase_count = record.erase_count.saturating_add(1);
            let count = record.erase_count;
            store.record_event(
                EventKind::Erase,
                format!("{name} completed erase operation"),
                &name,
                now,
            );
            info!(device = %name, erase_count = count, "📊 Erase recorded");
        }
        (_, DEVICE_ONLINE) => {
            store.record_event(EventKind::Info, format!("{name} connected"), &name, now);
        }
        (_, event) => {
            debug!(device = %name, operation = %operation, event = %event, "Stats event without counter");
        }
    }

    Ok(Applied::Mutated)
}

/// `{prefix}/status/{device_id}/{state}`; only known devices are affected
pub fn reduce_status(
    store: &mut StateStore,
    device_id: &str,
    state: &str,
    now: DateTime<Utc>,
) -> ReduceResult {
    let online = state == STATE_ONLINE;
    let Some(name) = store.find_by_device_id(device_id).map(str::to_owned) else {
        debug!(device_id = %device_id, "Status for unknown device");
        return Ok(Applied::Ignored);
    };

    if !store.set_online(&name, online, now) {
        return Ok(Applied::Ignored);
    }

    let transition = if online { "came online" } else { "went offline" };
    store.record_event(EventKind::Info, format!("{name} {transition}"), &name, now);
    info!(device = %name, online, "📱 Device status changed");
    Ok(Applied::Mutated)
}

/// `{prefix}/serial/{device_id}/{session_id}/status` with `connected` or
/// `disconnected`
///
/// An empty payload is the publisher clearing its retained status and is
/// ignored.
pub fn reduce_serial_status(
    store: &mut StateStore,
    options: ReducerOptions,
    device_id: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> ReduceResult {
    let payload = payload.trim();
    if payload.is_empty() {
        debug!(device_id = %device_id, "Ignoring cleared serial status");
        return Ok(Applied::Ignored);
    }

    let online = payload == SERIAL_CONNECTED;
    let Some(name) = store.find_by_device_id(device_id).map(str::to_owned) else {
        debug!(device_id = %device_id, "Serial status for unknown device");
        return Ok(Applied::Ignored);
    };

    if !store.set_online(&name, online, now) {
        return Ok(Applied::Ignored);
    }

    let transition = if online { "connected" } else { "disconnected" };
    store.record_event(EventKind::Info, format!("{name} {transition}"), &name, now);
    info!(device = %name, online, "📱 Serial session status changed");

    if !online && options.count_disconnect_as_flash {
        let record = store.upsert_device(&name, device_id, now);
        record.flash_count = record.flash_count.saturating_add(1);
        let count = record.flash_count;
        store.record_event(
            EventKind::Flash,
            format!("{name} completed flash operation"),
            &name,
            now,
        );
        debug!(device = %name, flash_count = count, "Disconnect counted as flash");
    }

    Ok(Applied::Mutated)
}

/// `{prefix}/serial/{device_id}/{session_id}/count` with an integer body
///
/// Any advance of the counter is attributed to flashing; the publisher does
/// not distinguish flash from erase at this level.
pub fn reduce_count(
    store: &mut StateStore,
    counts: &mut SessionCounts,
    device_id: &str,
    session_id: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> ReduceResult {
    let value: u64 = payload
        .trim()
        .parse()
        .map_err(|_| MessageError::InvalidCount(payload.to_string()))?;

    let delta = counts.observe(device_id, session_id, value);
    if delta == 0 {
        debug!(device_id = %device_id, session_id = %session_id, value, "Count did not advance");
        return Ok(Applied::Ignored);
    }

    let name = store
        .find_by_device_id(device_id)
        .map_or_else(|| placeholder_name(device_id), str::to_owned);

    let record = store.upsert_device(&name, device_id, now);
    record.flash_count = record.flash_count.saturating_add(delta);
    let count = record.flash_count;

    let noun = if delta == 1 { "operation" } else { "operations" };
    store.record_event(
        EventKind::Flash,
        format!("{name} completed {delta} flash {noun}"),
        &name,
        now,
    );
    info!(device = %name, delta, flash_count = count, "📊 Count advanced");
    Ok(Applied::Mutated)
}

/// `{prefix}/serial/{device_id}/{session_id}/info` with `{name}|{battery}`
pub fn reduce_info(
    store: &mut StateStore,
    device_id: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> ReduceResult {
    let Some((name, battery)) = payload.split_once('|').filter(|(name, _)| !name.is_empty())
    else {
        return Err(MessageError::MalformedInfo(payload.to_string()));
    };

    store.upsert_device(name, device_id, now);
    info!(device = %name, battery = %battery, "📱 Device info");
    Ok(Applied::Mutated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn reducer() -> Reducer {
        Reducer::new("pierre", ReducerOptions::default())
    }

    fn store() -> StateStore {
        StateStore::new("unused.json")
    }

    fn stats(name: &str, event: &str) -> Vec<u8> {
        format!(r#"{{"event":"{event}","device_name":"{name}","app_version":"1.4.2"}}"#)
            .into_bytes()
    }

    #[test]
    fn test_stats_flash_success() {
        let (mut r, mut s) = (reducer(), store());
        let applied = r
            .apply(&mut s, "pierre/stats/d1/flash", &stats("X", "flash_success"), now())
            .unwrap();

        assert_eq!(applied, Applied::Mutated);
        let record = s.device("X").unwrap();
        assert_eq!(record.flash_count, 1);
        assert_eq!(record.erase_count, 0);
        assert_eq!(record.app_version, "1.4.2");
        assert_eq!(record.last_device_id, "d1");

        let event = s.events().next().unwrap();
        assert_eq!(event.kind, EventKind::Flash);
        assert_eq!(event.message, "X completed flash operation");
        assert_eq!(event.device_name, "X");
    }

    #[test]
    fn test_stats_erase_success() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/d1/erase", &stats("X", "erase_success"), now())
            .unwrap();

        let record = s.device("X").unwrap();
        assert_eq!(record.flash_count, 0);
        assert_eq!(record.erase_count, 1);
        assert_eq!(s.events().next().unwrap().kind, EventKind::Erase);
    }

    #[test]
    fn test_stats_mismatched_operation_counts_nothing() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/d1/erase", &stats("X", "flash_success"), now())
            .unwrap();

        let record = s.device("X").unwrap();
        assert_eq!(record.flash_count, 0);
        assert_eq!(record.erase_count, 0);
        assert_eq!(s.events().len(), 0);
        assert!(s.is_dirty());
    }

    #[test]
    fn test_stats_device_online_is_info_only() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/d1/device", &stats("X", "device_online"), now())
            .unwrap();

        let record = s.device("X").unwrap();
        assert_eq!(record.flash_count, 0);
        let event = s.events().next().unwrap();
        assert_eq!(event.kind, EventKind::Info);
        assert_eq!(event.message, "X connected");
    }

    #[test]
    fn test_stats_missing_name_uses_placeholder() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/abc/flash", br#"{"event":"flash_success"}"#, now())
            .unwrap();

        let record = s.device("Device abc").unwrap();
        assert_eq!(record.flash_count, 1);
        assert_eq!(record.app_version, "unknown");
    }

    #[test]
    fn test_stats_malformed_json_is_rejected() {
        let (mut r, mut s) = (reducer(), store());
        let result = r.apply(&mut s, "pierre/stats/d1/flash", b"{not json", now());

        assert!(matches!(result, Err(MessageError::InvalidJson(_))));
        assert!(s.devices().is_empty());
        assert_eq!(s.events().len(), 0);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let (mut r, mut s) = (reducer(), store());
        let result = r.apply(&mut s, "pierre/stats/d1/flash", &[0xff, 0xfe], now());
        assert_eq!(result, Err(MessageError::InvalidUtf8));
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_status_transitions() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/d1/device", &stats("X", "device_online"), now())
            .unwrap();

        let applied = r.apply(&mut s, "pierre/status/d1/online", b"online", now()).unwrap();
        assert_eq!(applied, Applied::Mutated);
        assert!(s.device("X").unwrap().online);
        assert_eq!(s.events().next().unwrap().message, "X came online");

        // repeated state is a no-op
        let applied = r.apply(&mut s, "pierre/status/d1/online", b"online", now()).unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(s.events().len(), 2);

        r.apply(&mut s, "pierre/status/d1/offline", b"offline", now()).unwrap();
        assert!(!s.device("X").unwrap().online);
        assert_eq!(s.events().next().unwrap().message, "X went offline");
    }

    #[test]
    fn test_status_unknown_device_is_noop() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/stats/d1/device", &stats("X", "device_online"), now())
            .unwrap();
        let before = s.snapshot(now());

        let applied = r.apply(&mut s, "pierre/status/zzz/online", b"online", now()).unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(s.snapshot(now()), before);
    }

    #[test]
    fn test_serial_status_disconnect_counts_flash() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"X|80", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"connected\n", now())
            .unwrap();
        assert!(s.device("X").unwrap().online);
        assert_eq!(s.device("X").unwrap().flash_count, 0);

        r.apply(&mut s, "pierre/serial/d1/s1/status", b"disconnected", now())
            .unwrap();
        let record = s.device("X").unwrap();
        assert!(!record.online);
        assert_eq!(record.flash_count, 1);

        let messages: Vec<&str> = s.events().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["X completed flash operation", "X disconnected", "X connected"]
        );
    }

    #[test]
    fn test_serial_status_heuristic_disabled() {
        let mut r = Reducer::new(
            "pierre",
            ReducerOptions {
                count_disconnect_as_flash: false,
            },
        );
        let mut s = store();
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"X|80", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"connected", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"disconnected", now())
            .unwrap();

        assert_eq!(s.device("X").unwrap().flash_count, 0);
        assert_eq!(s.events().next().unwrap().message, "X disconnected");
    }

    #[test]
    fn test_serial_status_empty_payload_ignored() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"X|80", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"connected", now()).unwrap();

        let applied = r.apply(&mut s, "pierre/serial/d1/s1/status", b"  ", now()).unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert!(s.device("X").unwrap().online);
    }

    #[test]
    fn test_count_deltas() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"X|80", now()).unwrap();

        // baseline
        let applied = r.apply(&mut s, "pierre/serial/d1/s1/count", b"10", now()).unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(s.device("X").unwrap().flash_count, 0);

        r.apply(&mut s, "pierre/serial/d1/s1/count", b"13", now()).unwrap();
        assert_eq!(s.device("X").unwrap().flash_count, 3);
        assert_eq!(s.events().next().unwrap().message, "X completed 3 flash operations");

        // repeated and decreasing values add nothing
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"13", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"2", now()).unwrap();
        assert_eq!(s.device("X").unwrap().flash_count, 3);

        r.apply(&mut s, "pierre/serial/d1/s1/count", b"3", now()).unwrap();
        assert_eq!(s.device("X").unwrap().flash_count, 4);
        assert_eq!(s.events().next().unwrap().message, "X completed 1 flash operation");
    }

    #[test]
    fn test_count_sessions_are_independent() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"5", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s2/count", b"50", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"6", now()).unwrap();

        assert_eq!(s.device("Device d1").unwrap().flash_count, 1);
    }

    #[test]
    fn test_count_saturates_instead_of_overflowing() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"0", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/count", b"5", now()).unwrap();
        assert_eq!(s.device("Device d1").unwrap().flash_count, 5);

        let max = u64::MAX.to_string();
        r.apply(&mut s, "pierre/serial/d1/s2/count", b"0", now()).unwrap();
        let applied = r
            .apply(&mut s, "pierre/serial/d1/s2/count", max.as_bytes(), now())
            .unwrap();
        assert_eq!(applied, Applied::Mutated);
        assert_eq!(s.device("Device d1").unwrap().flash_count, u64::MAX);

        // pinned at the ceiling from here on
        r.apply(&mut s, "pierre/stats/d1/flash", &stats("Device d1", "flash_success"), now())
            .unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"Device d1|10", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"connected", now()).unwrap();
        r.apply(&mut s, "pierre/serial/d1/s1/status", b"disconnected", now())
            .unwrap();
        assert_eq!(s.device("Device d1").unwrap().flash_count, u64::MAX);
    }

    #[test]
    fn test_loaded_counters_at_ceiling_saturate() {
        let mut record = crate::types::DeviceRecord::new("d1", "t0");
        record.flash_count = u64::MAX;
        record.erase_count = u64::MAX;
        let snapshot = crate::types::Snapshot::new(
            std::collections::BTreeMap::from([("X".to_string(), record)]),
            Vec::new(),
            "t0",
        );
        let mut s = StateStore::from_snapshot("unused.json", snapshot);
        let mut r = reducer();

        r.apply(&mut s, "pierre/stats/d1/flash", &stats("X", "flash_success"), now())
            .unwrap();
        r.apply(&mut s, "pierre/stats/d1/erase", &stats("X", "erase_success"), now())
            .unwrap();

        let record = s.device("X").unwrap();
        assert_eq!(record.flash_count, u64::MAX);
        assert_eq!(record.erase_count, u64::MAX);
    }

    #[test]
    fn test_malformed_topic_is_rejected() {
        let (mut r, mut s) = (reducer(), store());
        for topic in [
            "pierre/stats/dev",
            "pierre/status/d/online/x",
            "pierre/stats//flash",
        ] {
            let result = r.apply(&mut s, topic, &stats("X", "flash_success"), now());
            assert_eq!(result, Err(MessageError::MalformedTopic(topic.to_string())));
        }
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_unhandled_namespace_is_ignored() {
        let (mut r, mut s) = (reducer(), store());
        for topic in ["pierre/serial/d1/s1", "pierre/serial/d1/s1/config", "other/stats/d/flash"] {
            assert_eq!(r.apply(&mut s, topic, b"raw line", now()), Ok(Applied::Ignored));
        }
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_count_non_integer_is_rejected() {
        let (mut r, mut s) = (reducer(), store());
        let result = r.apply(&mut s, "pierre/serial/d1/s1/count", b"12.5", now());
        assert_eq!(result, Err(MessageError::InvalidCount("12.5".to_string())));
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_info_creates_and_refreshes() {
        let (mut r, mut s) = (reducer(), store());
        r.apply(&mut s, "pierre/serial/d1/s1/info", b"Samsung SM-G991B|-1", now())
            .unwrap();
        r.apply(&mut s, "pierre/serial/d2/s9/info", b"Samsung SM-G991B|55", now())
            .unwrap();

        let record = s.device("Samsung SM-G991B").unwrap();
        assert_eq!(record.last_device_id, "d2");
        assert_eq!(s.events().len(), 0);
    }

    #[test]
    fn test_info_without_separator_is_rejected() {
        let (mut r, mut s) = (reducer(), store());
        let result = r.apply(&mut s, "pierre/serial/d1/s1/info", b"no battery", now());
        assert!(matches!(result, Err(MessageError::MalformedInfo(_))));

        let result = r.apply(&mut s, "pierre/serial/d1/s1/info", b"|50", now());
        assert!(matches!(result, Err(MessageError::MalformedInfo(_))));
        assert!(s.devices().is_empty());
    }

    #[test]
    fn test_unrouted_topics_are_ignored() {
        let (mut r, mut s) = (reducer(), store());
        let applied = r
            .apply(&mut s, "pierre/serial/d1/s1", b"I (123) boot: ESP-IDF", now())
            .unwrap();
        assert_eq!(applied, Applied::Ignored);

        let applied = r.apply(&mut s, "pierre/serial/d1/s1/config", &[0xff], now()).unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_session_counts_observe() {
        let mut counts = SessionCounts::default();
        assert!(counts.is_empty());
        assert_eq!(counts.observe("d", "s", 7), 0);
        assert_eq!(counts.observe("d", "s", 9), 2);
        assert_eq!(counts.observe("d", "s", 1), 0);
        assert_eq!(counts.observe("d", "s", 4), 3);
        assert_eq!(counts.len(), 1);
    }
}
