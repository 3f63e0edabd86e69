//! # Flash statistics collector
//!
//! Connects to the cloud MQTT broker the flashing app publishes to, listens
//! for a fixed window, and folds device events into a JSON snapshot of
//! per-device flash/erase counters plus the latest 100 events.
//!
//! ## Flow
//!
//! 1. [`StateStore::load`] reads the previous snapshot (a missing or broken
//!    file is an empty store).
//! 2. [`Collector::collect`] connects through a [`BrokerSession`], subscribes
//!    to the profile's filters and feeds every message through the
//!    [`Reducer`], one at a time.
//! 3. [`Collector::save`] writes the snapshot only if something changed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use flashstats::{Collector, CollectorConfig, Credentials, MqttSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_env()?;
//!     let mut collector = Collector::load(CollectorConfig::default()).await;
//!
//!     let summary = collector.run(&MqttSession::new(), &credentials).await?;
//!     println!("{} messages, {:?}", summary.report.received, summary.save);
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]

pub mod collector;
pub mod config;
pub mod constants;
pub mod error;
pub mod reducer;
pub mod session;
pub mod store;
pub mod topic;
pub mod types;

pub use collector::{CollectionReport, Collector, RunSummary};
pub use config::{CollectorConfig, Credentials, SubscriptionProfile};
pub use error::{CollectorError, MessageError, Result};
pub use reducer::{Applied, Reducer, ReducerOptions, SessionCounts};
pub use session::{BrokerSession, InboundMessage, MessageSink, MockSession, MqttSession};
pub use store::{SaveOutcome, StateStore};
pub use topic::{classify, topic_matches_filter, TopicKind};
pub use types::{DeviceRecord, Event, EventKind, Snapshot};
