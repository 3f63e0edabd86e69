//! Collector configuration
//!
//! Everything except credentials can come from a JSON or TOML file and be
//! overridden field by field with the `with_*` builders. Credentials are only
//! ever read from the environment.

use crate::constants::{self, broker, topics};
use crate::error::{CollectorError, Result};
use crate::reducer::ReducerOptions;
use crate::topic::validate_topic_filter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which topic filters to subscribe to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionProfile {
    /// Stats, device status and serial info
    Stats,
    /// `Stats` plus serial count and serial status
    #[default]
    Serial,
    /// Everything under the prefix
    Debug,
}

impl SubscriptionProfile {
    /// Topic filters for this profile under `prefix`
    #[must_use]
    pub fn filters(self, prefix: &str) -> Vec<String> {
        let stats = format!("{prefix}/{}/+/+", topics::STATS);
        let status = format!("{prefix}/{}/+/+", topics::STATUS);
        let serial = |leaf: &str| format!("{prefix}/{}/+/+/{leaf}", topics::SERIAL);

        match self {
            SubscriptionProfile::Stats => vec![stats, status, serial(topics::LEAF_INFO)],
            SubscriptionProfile::Serial => vec![
                stats,
                status,
                serial(topics::LEAF_INFO),
                serial(topics::LEAF_COUNT),
                serial(topics::LEAF_STATUS),
            ],
            SubscriptionProfile::Debug => vec![format!("{prefix}/#")],
        }
    }
}

impl FromStr for SubscriptionProfile {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stats" => Ok(SubscriptionProfile::Stats),
            "serial" => Ok(SubscriptionProfile::Serial),
            "debug" => Ok(SubscriptionProfile::Debug),
            other => Err(CollectorError::InvalidConfig(format!(
                "unknown subscription profile '{other}' (expected stats, serial or debug)"
            ))),
        }
    }
}

impl fmt::Display for SubscriptionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubscriptionProfile::Stats => "stats",
            SubscriptionProfile::Serial => "serial",
            SubscriptionProfile::Debug => "debug",
        })
    }
}

/// Broker username and password
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads `HIVEMQ_USERNAME` and `HIVEMQ_PASSWORD`
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::MissingCredential`] naming the first variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::MissingCredential`] naming the first variable
    /// that is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(CollectorError::MissingCredential(name))
        };
        Ok(Self {
            username: read(broker::USERNAME_ENV)?,
            password: read(broker::PASSWORD_ENV)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Collector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Broker host name
    pub broker_host: String,

    /// Broker TLS port
    pub broker_port: u16,

    /// Root segment of every device topic
    pub topic_prefix: String,

    /// Filters to subscribe to
    pub profile: SubscriptionProfile,

    /// Snapshot file
    pub state_file: PathBuf,

    /// How long to stay subscribed, in seconds
    pub collection_secs: u64,

    /// How long to wait for CONNACK, in seconds
    pub connect_timeout_secs: u64,

    /// Seconds between progress log lines
    pub progress_secs: u64,

    /// MQTT keep alive, in seconds
    pub keep_alive_secs: u64,

    /// Inbound channel capacity
    pub channel_capacity: usize,

    /// Fixed client id; derived from the start time when unset
    pub client_id: Option<String>,

    /// Count a serial disconnect as a completed flash
    pub count_disconnect_as_flash: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            broker_host: broker::HOST.to_string(),
            broker_port: broker::PORT,
            topic_prefix: topics::PREFIX.to_string(),
            profile: SubscriptionProfile::default(),
            state_file: PathBuf::from(constants::DEFAULT_STATE_FILE),
            collection_secs: constants::COLLECTION_WINDOW.as_secs(),
            connect_timeout_secs: constants::CONNECT_TIMEOUT.as_secs(),
            progress_secs: constants::PROGRESS_INTERVAL.as_secs(),
            keep_alive_secs: constants::KEEP_ALIVE.as_secs(),
            channel_capacity: constants::CHANNEL_CAPACITY,
            client_id: None,
            count_disconnect_as_flash: ReducerOptions::default().count_disconnect_as_flash,
        }
    }
}

impl CollectorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file, TOML if the extension is `.toml`, JSON
    /// otherwise
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidConfig`] if the file cannot be read or
    /// parsed.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CollectorError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;

        if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            toml::from_str(&content)
                .map_err(|e| CollectorError::InvalidConfig(format!("invalid TOML config: {e}")))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| CollectorError::InvalidConfig(format!("invalid JSON config: {e}")))
        }
    }

    #[must_use]
    pub fn with_broker(mut self, host: impl Into<String>, port: u16) -> Self {
        self.broker_host = host.into();
        self.broker_port = port;
        self
    }

    #[must_use]
    pub fn with_topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: SubscriptionProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }

    #[must_use]
    pub fn with_collection_window(mut self, window: Duration) -> Self {
        self.collection_secs = window.as_secs();
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = timeout.as_secs();
        self
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    #[must_use]
    pub fn with_disconnect_heuristic(mut self, enabled: bool) -> Self {
        self.count_disconnect_as_flash = enabled;
        self
    }

    /// Broker URL; the collector always connects over TLS
    #[must_use]
    pub fn broker_url(&self) -> String {
        format!("mqtts://{}:{}", self.broker_host, self.broker_port)
    }

    /// Filters for the configured profile and prefix
    #[must_use]
    pub fn topic_filters(&self) -> Vec<String> {
        self.profile.filters(&self.topic_prefix)
    }

    #[must_use]
    pub fn collection_window(&self) -> Duration {
        Duration::from_secs(self.collection_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_secs)
    }

    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    #[must_use]
    pub fn reducer_options(&self) -> ReducerOptions {
        ReducerOptions {
            count_disconnect_as_flash: self.count_disconnect_as_flash,
        }
    }

    /// Configured client id, or `flashstats-collector-{unix_seconds}`
    #[must_use]
    pub fn client_id_or_default(&self) -> String {
        self.client_id.clone().unwrap_or_else(|| {
            format!(
                "{}-{}",
                broker::CLIENT_ID_PREFIX,
                chrono::Utc::now().timestamp()
            )
        })
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.broker_host.is_empty() {
            return Err(CollectorError::InvalidConfig(
                "broker host cannot be empty".to_string(),
            ));
        }
        if self.broker_port == 0 {
            return Err(CollectorError::InvalidConfig(
                "broker port cannot be 0".to_string(),
            ));
        }
        if self.topic_prefix.is_empty()
            || self.topic_prefix.contains(['+', '#'])
            || self.topic_prefix.ends_with('/')
        {
            return Err(CollectorError::InvalidConfig(format!(
                "topic prefix '{}' must be non-empty, wildcard-free and not end with '/'",
                self.topic_prefix
            )));
        }
        if self.collection_secs == 0 {
            return Err(CollectorError::InvalidConfig(
                "collection window must be at least one second".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CollectorError::InvalidConfig(
                "connect timeout must be at least one second".to_string(),
            ));
        }
        if self.progress_secs == 0 {
            return Err(CollectorError::InvalidConfig(
                "progress interval must be at least one second".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(CollectorError::InvalidConfig(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        for filter in self.topic_filters() {
            validate_topic_filter(&filter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.topic_prefix, "pierre");
        assert_eq!(config.collection_window(), Duration::from_secs(240));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.state_file, PathBuf::from("stats-data.json"));
        assert!(config.broker_url().starts_with("mqtts://"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_filters() {
        assert_eq!(
            SubscriptionProfile::Stats.filters("pierre"),
            vec![
                "pierre/stats/+/+",
                "pierre/status/+/+",
                "pierre/serial/+/+/info"
            ]
        );
        let serial = SubscriptionProfile::Serial.filters("pierre");
        assert_eq!(serial.len(), 5);
        assert!(serial.contains(&"pierre/serial/+/+/count".to_string()));
        assert!(serial.contains(&"pierre/serial/+/+/status".to_string()));
        assert_eq!(SubscriptionProfile::Debug.filters("pierre"), vec!["pierre/#"]);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("stats".parse::<SubscriptionProfile>().unwrap(), SubscriptionProfile::Stats);
        assert_eq!("DEBUG".parse::<SubscriptionProfile>().unwrap(), SubscriptionProfile::Debug);
        assert!("verbose".parse::<SubscriptionProfile>().is_err());
    }

    #[test]
    fn test_credentials_lookup() {
        let env = HashMap::from([
            ("HIVEMQ_USERNAME", "collector"),
            ("HIVEMQ_PASSWORD", "s3cret"),
        ]);
        let creds =
            Credentials::from_lookup(|name| env.get(name).map(ToString::to_string)).unwrap();
        assert_eq!(creds.username, "collector");
        assert!(!format!("{creds:?}").contains("s3cret"));
    }

    #[test]
    fn test_credentials_missing_or_empty() {
        let env = HashMap::from([("HIVEMQ_USERNAME", "collector"), ("HIVEMQ_PASSWORD", "")]);
        let err =
            Credentials::from_lookup(|name| env.get(name).map(ToString::to_string)).unwrap_err();
        assert!(matches!(err, CollectorError::MissingCredential("HIVEMQ_PASSWORD")));

        let err = Credentials::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, CollectorError::MissingCredential("HIVEMQ_USERNAME")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(CollectorConfig::new().with_topic_prefix("").validate().is_err());
        assert!(CollectorConfig::new().with_topic_prefix("a/+").validate().is_err());
        assert!(CollectorConfig::new().with_topic_prefix("a/").validate().is_err());
        assert!(CollectorConfig::new()
            .with_collection_window(Duration::ZERO)
            .validate()
            .is_err());
        assert!(CollectorConfig::new().with_broker("", 8883).validate().is_err());
    }

    #[test]
    fn test_client_id() {
        let config = CollectorConfig::new();
        assert!(config.client_id_or_default().starts_with("flashstats-collector-"));
        let config = config.with_client_id("fixed");
        assert_eq!(config.client_id_or_default(), "fixed");
    }

    #[tokio::test]
    async fn test_from_file_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("collector.json");
        std::fs::write(&json_path, r#"{"collection_secs": 60, "profile": "debug"}"#).unwrap();
        let config = CollectorConfig::from_file(&json_path).await.unwrap();
        assert_eq!(config.collection_secs, 60);
        assert_eq!(config.profile, SubscriptionProfile::Debug);
        assert_eq!(config.broker_port, 8883);

        let toml_path = dir.path().join("collector.toml");
        std::fs::write(
            &toml_path,
            "topic_prefix = \"lab\"\nstate_file = \"out/stats.json\"\ncount_disconnect_as_flash = false\n",
        )
        .unwrap();
        let config = CollectorConfig::from_file(&toml_path).await.unwrap();
        assert_eq!(config.topic_prefix, "lab");
        assert_eq!(config.state_file, PathBuf::from("out/stats.json"));
        assert!(!config.count_disconnect_as_flash);
    }

    #[tokio::test]
    async fn test_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collector.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            CollectorConfig::from_file(&path).await,
            Err(CollectorError::InvalidConfig(_))
        ));
    }
}
