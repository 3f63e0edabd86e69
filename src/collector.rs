//! Collection run
//!
//! [`Collector`] is the per-run context: configuration, state store and
//! reducer, built once and passed nothing global. A run is
//! connect → subscribe → drain the inbound channel until the window closes →
//! disconnect → save.

use crate::config::{CollectorConfig, Credentials};
use crate::error::{CollectorError, Result};
use crate::reducer::{Applied, Reducer};
use crate::session::{BrokerSession, InboundMessage, MessageSink, SessionOptions};
use crate::store::{SaveOutcome, StateStore};
use chrono::Utc;
use tokio::time::{interval_at, sleep, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Message accounting for one collection window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Messages taken off the inbound channel
    pub received: u64,
    /// Messages that changed the store
    pub applied: u64,
    /// Messages that were valid but changed nothing
    pub ignored: u64,
    /// Messages that failed to decode and were dropped
    pub rejected: u64,
    /// Messages lost because the inbound channel was full
    pub dropped: u64,
}

/// Outcome of [`Collector::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub report: CollectionReport,
    pub save: SaveOutcome,
}

/// Per-run collector context
#[derive(Debug)]
pub struct Collector {
    config: CollectorConfig,
    store: StateStore,
    reducer: Reducer,
}

impl Collector {
    /// Builds a collector over an already loaded store
    #[must_use]
    pub fn new(config: CollectorConfig, store: StateStore) -> Self {
        let reducer = Reducer::new(config.topic_prefix.clone(), config.reducer_options());
        Self {
            config,
            store,
            reducer,
        }
    }

    /// Builds a collector, loading prior state from the configured file
    pub async fn load(config: CollectorConfig) -> Self {
        let store = StateStore::load(config.state_file.clone()).await;
        Self::new(config, store)
    }

    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Collects for the configured window, then saves if anything changed
    ///
    /// # Errors
    ///
    /// Returns any error from [`collect`](Self::collect), or the persistence
    /// error if the snapshot could not be written.
    pub async fn run<S: BrokerSession>(
        &mut self,
        session: &S,
        credentials: &Credentials,
    ) -> Result<RunSummary> {
        let report = self.collect(session, credentials).await?;
        let save = self.save().await?;
        Ok(RunSummary { report, save })
    }

    /// Writes the store if it is dirty
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Persistence`] if the write failed.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        self.store.save(Utc::now()).await
    }

    /// Connects, subscribes and reduces inbound messages until the window
    /// closes
    ///
    /// Messages are reduced one at a time on this task. A message that fails
    /// to reduce is logged with its topic and dropped; it never ends the
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, if the broker does
    /// not acknowledge the connection within the connect timeout, or if a
    /// subscription is refused.
    pub async fn collect<S: BrokerSession>(
        &mut self,
        session: &S,
        credentials: &Credentials,
    ) -> Result<CollectionReport> {
        self.config.validate()?;
        let filters = self.config.topic_filters();

        let address = self.config.broker_url();
        let options = SessionOptions {
            client_id: self.config.client_id_or_default(),
            credentials: credentials.clone(),
            keep_alive: self.config.keep_alive(),
        };

        info!(address = %address, client_id = %options.client_id, "Connecting to broker");
        let connect_timeout = self.config.connect_timeout();
        match timeout(connect_timeout, session.connect(&address, &options)).await {
            Ok(Ok(())) => info!("✅ Connected to broker"),
            Ok(Err(e)) => {
                error!(address = %address, error = %e, "❌ Failed to connect to broker");
                return Err(e);
            }
            Err(_) => {
                error!(address = %address, timeout = ?connect_timeout, "❌ Failed to connect to broker within timeout");
                return Err(CollectorError::ConnectTimeout {
                    address,
                    timeout: connect_timeout,
                });
            }
        }

        let (sink, mut rx) = MessageSink::channel(self.config.channel_capacity);
        for filter in &filters {
            if let Err(e) = session.subscribe(filter, sink.clone()).await {
                error!(filter = %filter, error = %e, "Subscription failed");
                disconnect_quietly(session).await;
                return Err(e);
            }
            info!(filter = %filter, "📡 Subscribed");
        }

        let window = self.config.collection_window();
        let progress_every = self.config.progress_interval();
        info!(window = ?window, "🚀 Collecting messages");

        let mut report = CollectionReport::default();
        let start = Instant::now();
        let deadline = sleep(window);
        tokio::pin!(deadline);
        let mut progress = interval_at(start + progress_every, progress_every);
        progress.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = &mut deadline => break,
                _ = progress.tick() => {
                    info!(
                        elapsed_secs = start.elapsed().as_secs(),
                        received = report.received,
                        "⏱️ Progress"
                    );
                }
                Some(message) = rx.recv() => self.handle_message(&message, &mut report),
            }
        }

        disconnect_quietly(session).await;

        // already queued before the window closed
        rx.close();
        while let Ok(message) = rx.try_recv() {
            self.handle_message(&message, &mut report);
        }

        report.dropped = sink.dropped();
        info!(
            received = report.received,
            applied = report.applied,
            ignored = report.ignored,
            rejected = report.rejected,
            dropped = report.dropped,
            "✅ Collection completed"
        );
        Ok(report)
    }

    /// Reduces one message into the store, recording the result in `report`
    pub fn handle_message(&mut self, message: &InboundMessage, report: &mut CollectionReport) {
        report.received += 1;
        debug!(
            n = report.received,
            topic = %message.topic,
            payload = %String::from_utf8_lossy(&message.payload),
            "📨 Message"
        );

        match self
            .reducer
            .apply(&mut self.store, &message.topic, &message.payload, Utc::now())
        {
            Ok(Applied::Mutated) => report.applied += 1,
            Ok(Applied::Ignored) => report.ignored += 1,
            Err(e) => {
                report.rejected += 1;
                error!(topic = %message.topic, error = %e, "Dropping message");
            }
        }
    }
}

async fn disconnect_quietly<S: BrokerSession>(session: &S) {
    match session.disconnect().await {
        Ok(()) => info!("📴 Disconnected from broker"),
        Err(e) => warn!(error = %e, "Disconnect failed"),
    }
}
