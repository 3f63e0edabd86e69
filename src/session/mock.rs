//! Mock broker session for testing
//!
//! Records every call, answers connect according to a configured
//! [`ConnectBehavior`], and replays scripted messages to matching
//! subscriptions so a whole collection run can be driven without a broker.

use crate::error::{CollectorError, Result};
use crate::session::{BrokerSession, InboundMessage, MessageSink, SessionOptions};
use crate::topic::topic_matches_filter;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Record of a method call made to the mock session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect {
        address: String,
        client_id: String,
        username: String,
    },
    Subscribe {
        filter: String,
    },
    Disconnect,
}

/// How the mock answers `connect`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectBehavior {
    #[default]
    Accept,
    /// Fail immediately with a connection error
    Refuse(String),
    /// Never acknowledge
    Hang,
}

#[derive(Default)]
struct MockState {
    calls: Vec<MockCall>,
    connect: ConnectBehavior,
    subscribe_failure: Option<String>,
    scripted: Vec<(Duration, InboundMessage)>,
    subscriptions: Vec<(String, MessageSink)>,
}

/// Mock broker session for testing
#[derive(Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<MockState>>,
}

impl MockSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // a poisoned lock only happens after a test already panicked
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Configures the response for connect calls
    #[must_use]
    pub fn with_connect_behavior(self, behavior: ConnectBehavior) -> Self {
        self.state().connect = behavior;
        self
    }

    /// Makes every subscribe call fail with `reason`
    #[must_use]
    pub fn with_subscribe_failure(self, reason: impl Into<String>) -> Self {
        self.state().subscribe_failure = Some(reason.into());
        self
    }

    /// Queues a message delivered right after a matching subscription is made
    #[must_use]
    pub fn with_message(self, topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.with_message_after(Duration::ZERO, topic, payload)
    }

    /// Queues a message delivered `delay` after a matching subscription is made
    #[must_use]
    pub fn with_message_after(
        self,
        delay: Duration,
        topic: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        self.state()
            .scripted
            .push((delay, InboundMessage::new(topic, payload)));
        self
    }

    /// Delivers a message now to every matching subscription
    pub fn inject(&self, topic: &str, payload: impl Into<Vec<u8>>) {
        let message = InboundMessage::new(topic, payload);
        for (filter, sink) in &self.state().subscriptions {
            if topic_matches_filter(topic, filter) {
                sink.deliver(message.clone());
            }
        }
    }

    /// Gets all recorded method calls
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Filters subscribed so far, in order
    #[must_use]
    pub fn subscribed_filters(&self) -> Vec<String> {
        self.state()
            .subscriptions
            .iter()
            .map(|(filter, _)| filter.clone())
            .collect()
    }
}

impl BrokerSession for MockSession {
    fn connect<'a>(
        &'a self,
        address: &'a str,
        options: &'a SessionOptions,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        let behavior = {
            let mut state = self.state();
            state.calls.push(MockCall::Connect {
                address: address.to_string(),
                client_id: options.client_id.clone(),
                username: options.credentials.username.clone(),
            });
            state.connect.clone()
        };

        async move {
            match behavior {
                ConnectBehavior::Accept => Ok(()),
                ConnectBehavior::Refuse(reason) => Err(CollectorError::Connection(reason)),
                ConnectBehavior::Hang => std::future::pending().await,
            }
        }
    }

    fn subscribe<'a>(
        &'a self,
        filter: &'a str,
        sink: MessageSink,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        let result = {
            let mut state = self.state();
            state.calls.push(MockCall::Subscribe {
                filter: filter.to_string(),
            });

            if let Some(reason) = state.subscribe_failure.clone() {
                Err(CollectorError::Subscription {
                    filter: filter.to_string(),
                    reason,
                })
            } else {
                for (delay, message) in &state.scripted {
                    if !topic_matches_filter(&message.topic, filter) {
                        continue;
                    }
                    if delay.is_zero() {
                        sink.deliver(message.clone());
                    } else {
                        let (delay, message, sink) = (*delay, message.clone(), sink.clone());
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            sink.deliver(message);
                        });
                    }
                }
                state.subscriptions.push((filter.to_string(), sink));
                Ok(())
            }
        };

        async move { result }
    }

    fn disconnect(&self) -> impl Future<Output = Result<()>> + Send + '_ {
        self.state().calls.push(MockCall::Disconnect);
        async move { Ok(()) }
    }
}
