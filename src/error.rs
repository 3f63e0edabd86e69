use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collector errors
///
/// Every variant ends the run that produced it. Per-message failures are
/// [`MessageError`]s instead.
///
/// # Error Categories
///
/// - **Configuration**: `MissingCredential`, `InvalidConfig`, `InvalidTopicFilter`
/// - **Connection**: `ConnectTimeout`, `Connection`, `Subscription`
/// - **Persistence**: `Persistence`
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid topic filter '{filter}': {reason}")]
    InvalidTopicFilter { filter: String, reason: String },

    #[error("No CONNACK from {address} within {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Subscription to '{filter}' failed: {reason}")]
    Subscription { filter: String, reason: String },

    #[error("Persistence error for {path}: {reason}")]
    Persistence { path: String, reason: String },
}

impl From<mqtt5::MqttError> for CollectorError {
    fn from(err: mqtt5::MqttError) -> Self {
        CollectorError::Connection(err.to_string())
    }
}

/// Failure to reduce a single inbound message
///
/// These never leave the message path: the collector logs them with the
/// offending topic and moves on to the next message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("Payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("Invalid JSON in stats payload: {0}")]
    InvalidJson(String),

    #[error("Count payload is not an integer: {0:?}")]
    InvalidCount(String),

    #[error("Info payload is not '<name>|<battery>': {0:?}")]
    MalformedInfo(String),

    #[error("Malformed topic: {0}")]
    MalformedTopic(String),
}
