//! Topic classification
//!
//! Inbound topics are parsed once into a [`TopicKind`] carrying the
//! identifiers the reducer needs. Anything that does not match a known shape
//! under the configured prefix is [`TopicKind::Unrouted`].

use crate::constants::topics::{LEAF_COUNT, LEAF_INFO, LEAF_STATUS, SERIAL, STATS, STATUS};
use crate::error::{CollectorError, Result};

/// Structured form of an inbound topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicKind<'a> {
    /// `{prefix}/stats/{device_id}/{operation}`
    Stats {
        device_id: &'a str,
        operation: &'a str,
    },
    /// `{prefix}/serial/{device_id}/{session_id}/count`
    Count {
        device_id: &'a str,
        session_id: &'a str,
    },
    /// `{prefix}/serial/{device_id}/{session_id}/status`
    SerialStatus {
        device_id: &'a str,
        session_id: &'a str,
    },
    /// `{prefix}/status/{device_id}/{state}`
    Status { device_id: &'a str, state: &'a str },
    /// `{prefix}/serial/{device_id}/{session_id}/info`
    Info {
        device_id: &'a str,
        session_id: &'a str,
    },
    /// In a handled namespace but not in the expected shape
    Malformed,
    /// Not a topic the reducer handles (raw serial log lines, config, ...)
    Unrouted,
}

impl TopicKind<'_> {
    /// Short label used in log fields
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TopicKind::Stats { .. } => "stats",
            TopicKind::Count { .. } => "count",
            TopicKind::SerialStatus { .. } => "serial-status",
            TopicKind::Status { .. } => "status",
            TopicKind::Info { .. } => "info",
            TopicKind::Malformed => "malformed",
            TopicKind::Unrouted => "unrouted",
        }
    }
}

/// Classifies `topic` under `prefix`
///
/// Shapes are checked most specific first: stats, serial count, serial
/// status, device status, serial info. Identifier segments must be non-empty.
/// A topic in the stats or status namespace, or ending in a handled serial
/// leaf, that does not fit its shape is [`TopicKind::Malformed`].
#[must_use]
pub fn classify<'a>(prefix: &str, topic: &'a str) -> TopicKind<'a> {
    let Some(rest) = topic
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return TopicKind::Unrouted;
    };

    let segments: Vec<&'a str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return if is_handled_namespace(&segments) {
            TopicKind::Malformed
        } else {
            TopicKind::Unrouted
        };
    }

    match segments[..] {
        [ns, device_id, operation] if ns == STATS => TopicKind::Stats {
            device_id,
            operation,
        },
        [ns, device_id, session_id, leaf] if ns == SERIAL && leaf == LEAF_COUNT => {
            TopicKind::Count {
                device_id,
                session_id,
            }
        }
        [ns, device_id, session_id, leaf] if ns == SERIAL && leaf == LEAF_STATUS => {
            TopicKind::SerialStatus {
                device_id,
                session_id,
            }
        }
        [ns, device_id, state] if ns == STATUS => TopicKind::Status { device_id, state },
        [ns, device_id, session_id, leaf] if ns == SERIAL && leaf == LEAF_INFO => {
            TopicKind::Info {
                device_id,
                session_id,
            }
        }
        _ if is_handled_namespace(&segments) => TopicKind::Malformed,
        _ => TopicKind::Unrouted,
    }
}

/// Stats and status topics, and serial topics ending in a leaf the reducer
/// reads; raw serial lines and other leaves are not ours to judge
fn is_handled_namespace(segments: &[&str]) -> bool {
    match segments {
        [ns, ..] if *ns == STATS || *ns == STATUS => true,
        [ns, .., leaf] if *ns == SERIAL => [LEAF_COUNT, LEAF_STATUS, LEAF_INFO].contains(leaf),
        _ => false,
    }
}

/// Checks if a topic matches a topic filter with `+` and `#` wildcards
#[must_use]
pub fn topic_matches_filter(topic: &str, filter: &str) -> bool {
    if filter == "#" {
        return true;
    }

    let mut topic_parts = topic.split('/');
    let mut filter_parts = filter.split('/');

    loop {
        match (filter_parts.next(), topic_parts.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(f), Some(t)) if f == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Validates wildcard placement in a subscription filter
///
/// # Errors
///
/// Returns [`CollectorError::InvalidTopicFilter`] for an empty filter, an
/// empty segment, a `#` that is not the whole last segment, or a `+` that
/// shares its segment with other characters.
pub fn validate_topic_filter(filter: &str) -> Result<()> {
    let invalid = |reason: &str| CollectorError::InvalidTopicFilter {
        filter: filter.to_string(),
        reason: reason.to_string(),
    };

    if filter.is_empty() {
        return Err(invalid("filter cannot be empty"));
    }
    if filter.contains("//") {
        return Err(invalid("filter cannot have empty segments"));
    }

    let segments: Vec<&str> = filter.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        if *segment == "#" {
            if i != segments.len() - 1 {
                return Err(invalid("'#' wildcard must be the last segment"));
            }
        } else if segment.contains('#') {
            return Err(invalid("'#' wildcard must be alone in its segment"));
        } else if segment.contains('+') && *segment != "+" {
            return Err(invalid("'+' wildcard must be alone in its segment"));
        }
    }

    Ok(())
}
