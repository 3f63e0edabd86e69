//! Collector Constants
//!
//! Broker coordinates, topic layout and persistence limits shared by the
//! store, the reducer and the session lifecycle.

use std::time::Duration;

/// Broker endpoint and credentials
pub mod broker {
    /// Cloud broker host
    pub const HOST: &str = "0c1bf62a21e94682adf340b8a2d3fe04.s1.eu.hivemq.cloud";

    /// TLS port
    pub const PORT: u16 = 8883;

    /// Environment variable holding the broker username
    pub const USERNAME_ENV: &str = "HIVEMQ_USERNAME";

    /// Environment variable holding the broker password
    pub const PASSWORD_ENV: &str = "HIVEMQ_PASSWORD";

    /// Client identifier prefix, suffixed with the start time in seconds
    pub const CLIENT_ID_PREFIX: &str = "flashstats-collector";
}

/// Topic namespace segments
pub mod topics {
    /// Root of every topic the devices publish to
    pub const PREFIX: &str = "pierre";

    /// `{prefix}/stats/{deviceId}/{operation}`
    pub const STATS: &str = "stats";

    /// `{prefix}/status/{deviceId}/{state}`
    pub const STATUS: &str = "status";

    /// `{prefix}/serial/{deviceId}/{sessionId}/{leaf}`
    pub const SERIAL: &str = "serial";

    /// Serial leaf carrying a monotonic message counter
    pub const LEAF_COUNT: &str = "count";

    /// Serial leaf carrying `connected` / `disconnected`
    pub const LEAF_STATUS: &str = "status";

    /// Serial leaf carrying `{deviceName}|{battery}`
    pub const LEAF_INFO: &str = "info";
}

/// Stats payload `event` values
pub mod events {
    pub const FLASH_SUCCESS: &str = "flash_success";
    pub const ERASE_SUCCESS: &str = "erase_success";
    pub const DEVICE_ONLINE: &str = "device_online";

    /// Stats operation segment for flashing
    pub const OP_FLASH: &str = "flash";

    /// Stats operation segment for erasing
    pub const OP_ERASE: &str = "erase";

    /// Status state segment meaning online; anything else is offline
    pub const STATE_ONLINE: &str = "online";

    /// Serial status payload meaning connected; anything else is disconnected
    pub const SERIAL_CONNECTED: &str = "connected";
}

/// Default snapshot file, relative to the working directory
pub const DEFAULT_STATE_FILE: &str = "stats-data.json";

/// Literal written to the snapshot `version` key
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Maximum number of events kept in memory and on disk
pub const MAX_EVENTS: usize = 100;

/// Default app version for devices that never reported one
pub const UNKNOWN_VERSION: &str = "unknown";

/// Hard limit on waiting for CONNACK
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default collection window (fits a five minute scheduler slot)
pub const COLLECTION_WINDOW: Duration = Duration::from_secs(240);

/// Interval between progress log lines
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(30);

/// Keep alive sent in CONNECT
pub const KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Capacity of the inbound message channel
pub const CHANNEL_CAPACITY: usize = 1024;
