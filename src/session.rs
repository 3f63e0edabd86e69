//! Broker session
//!
//! [`BrokerSession`] is the only seam between the collector and the network:
//! connect, subscribe with a [`MessageSink`], disconnect. The transport
//! callback never touches collector state; it only pushes into a bounded
//! channel that the collector drains one message at a time.

pub mod mock;

use crate::config::Credentials;
use crate::constants::broker::CLIENT_ID_PREFIX;
use crate::error::{CollectorError, Result};
use mqtt5::{ConnectOptions, MqttClient, QoS, SubscribeOptions};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub use self::mock::{ConnectBehavior, MockCall, MockSession};

/// A message as delivered by the broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Sending half of the inbound channel, handed to subscription callbacks
///
/// Delivery never blocks the transport. When the channel is full the message
/// is dropped, counted and logged.
#[derive(Debug, Clone)]
pub struct MessageSink {
    tx: mpsc::Sender<InboundMessage>,
    dropped: Arc<AtomicU64>,
}

impl MessageSink {
    /// Creates a sink and its receiver with room for `capacity` messages
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<InboundMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    pub fn deliver(&self, message: InboundMessage) {
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(message)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(topic = %message.topic, "Inbound channel full, dropping message");
            }
            Err(mpsc::error::TrySendError::Closed(message)) => {
                debug!(topic = %message.topic, "Collection finished, discarding late message");
            }
        }
    }

    /// Messages dropped because the channel was full
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Connection parameters that are not part of the broker URL
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub client_id: String,
    pub credentials: Credentials,
    pub keep_alive: Duration,
}

/// The publish/subscribe capability the collector needs from a broker client
pub trait BrokerSession: Send + Sync {
    /// Connects and resolves once the broker acknowledged the session
    fn connect<'a>(
        &'a self,
        address: &'a str,
        options: &'a SessionOptions,
    ) -> impl Future<Output = Result<()>> + Send + 'a;

    /// Subscribes to `filter` at the lowest delivery guarantee, forwarding
    /// every message to `sink`
    fn subscribe<'a>(
        &'a self,
        filter: &'a str,
        sink: MessageSink,
    ) -> impl Future<Output = Result<()>> + Send + 'a;

    /// Closes the session
    fn disconnect(&self) -> impl Future<Output = Result<()>> + Send + '_;
}

/// [`BrokerSession`] backed by an `mqtt5` client
///
/// The client id is taken from [`SessionOptions`] at connect time.
/// Automatic reconnection is disabled: a failed run is retried by whatever
/// scheduled it.
pub struct MqttSession {
    client: MqttClient,
}

impl MqttSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: MqttClient::new(CLIENT_ID_PREFIX),
        }
    }
}

impl Default for MqttSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrokerSession for MqttSession {
    fn connect<'a>(
        &'a self,
        address: &'a str,
        options: &'a SessionOptions,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        async move {
            let connect_options = ConnectOptions::new(options.client_id.clone())
                .with_clean_start(true)
                .with_keep_alive(options.keep_alive)
                .with_automatic_reconnect(false)
                .with_credentials(
                    options.credentials.username.clone(),
                    options.credentials.password.clone().into_bytes(),
                );

            let result = self
                .client
                .connect_with_options(address, connect_options)
                .await?;
            debug!(
                client_id = %options.client_id,
                session_present = result.session_present,
                "Broker acknowledged connection"
            );
            Ok(())
        }
    }

    fn subscribe<'a>(
        &'a self,
        filter: &'a str,
        sink: MessageSink,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        async move {
            let subscribe_options = SubscribeOptions {
                qos: QoS::AtMostOnce,
                ..Default::default()
            };

            let (packet_id, granted_qos) = self
                .client
                .subscribe_with_options(filter, subscribe_options, move |message| {
                    sink.deliver(InboundMessage {
                        topic: message.topic,
                        payload: message.payload,
                    });
                })
                .await
                .map_err(|e| CollectorError::Subscription {
                    filter: filter.to_string(),
                    reason: e.to_string(),
                })?;

            debug!(
                filter = %filter,
                packet_id,
                granted_qos = ?granted_qos,
                "Subscription confirmed"
            );
            Ok(())
        }
    }

    fn disconnect(&self) -> impl Future<Output = Result<()>> + Send + '_ {
        async move {
            self.client.disconnect().await?;
            Ok(())
        }
    }
}
