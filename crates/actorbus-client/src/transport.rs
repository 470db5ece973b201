//! The opaque bus capability: send bytes to a topic, poll bytes back.

use crate::error::ClientError;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

/// One payload pulled off the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// A message bus client, reduced to what the shims need.
///
/// Topic administration and schema handling stay with the implementation.
pub trait Transport: Send + Sync + 'static {
    /// Resolves once the bus has acknowledged the payload.
    fn send(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Waits up to `timeout` for the next payload on any of `topics`.
    fn poll(
        &self,
        topics: &[String],
        timeout: Duration,
    ) -> impl Future<Output = Result<Option<Delivery>, ClientError>> + Send;
}

#[derive(Debug, Default)]
struct Queues {
    topics: HashMap<String, VecDeque<Vec<u8>>>,
}

impl Queues {
    fn take(&mut self, topics: &[String]) -> Option<Delivery> {
        topics.iter().find_map(|topic| {
            let payload = self.topics.get_mut(topic)?.pop_front()?;
            Some(Delivery {
                topic: topic.clone(),
                payload,
            })
        })
    }
}

/// In-process bus with one FIFO queue per topic.
///
/// Every payload is delivered once, to whichever poller takes it first.
/// Clones share the same queues.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    queues: Arc<Mutex<Queues>>,
    arrived: Arc<Notify>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads waiting on `topic`.
    pub async fn pending(&self, topic: &str) -> usize {
        self.queues
            .lock()
            .await
            .topics
            .get(topic)
            .map_or(0, VecDeque::len)
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, topic: &str, payload: Vec<u8>) -> Result<(), ClientError> {
        if topic.is_empty() {
            return Err(ClientError::Transport("empty topic name".into()));
        }
        self.queues
            .lock()
            .await
            .topics
            .entry(topic.to_string())
            .or_default()
            .push_back(payload);
        self.arrived.notify_waiters();
        Ok(())
    }

    async fn poll(
        &self,
        topics: &[String],
        timeout: Duration,
    ) -> Result<Option<Delivery>, ClientError> {
        let deadline = Instant::now() + timeout;
        loop {
            // Register for wakeups before looking, so a send in between is not missed.
            let arrived = self.arrived.notified();
            tokio::pin!(arrived);
            arrived.as_mut().enable();

            if let Some(delivery) = self.queues.lock().await.take(topics) {
                return Ok(Some(delivery));
            }
            if tokio::time::timeout_at(deadline, arrived).await.is_err() {
                return Ok(None);
            }
        }
    }
}
