//! Receiving envelopes on a background task.

use crate::codec::{JsonPayloadCodec, PayloadCodec};
use crate::config::BusConfig;
use crate::error::ClientError;
use crate::transport::{Delivery, Transport};
use actorbus_core::{Message, Registry};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Receives every envelope the consumer decodes.
pub trait MessageHandler: Send + 'static {
    fn handle_message(&mut self, topic: &str, message: Message);
}

impl<F> MessageHandler for F
where
    F: FnMut(&str, Message) + Send + 'static,
{
    fn handle_message(&mut self, topic: &str, message: Message) {
        self(topic, message)
    }
}

/// Counters reported when a consumer stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub delivered: u64,
    /// Payloads skipped because they could not be decoded.
    pub rejected: u64,
}

/// Pulls payloads for a fixed set of topics and decodes them through the
/// global [`Registry`].
pub struct Consumer<T, C = JsonPayloadCodec> {
    transport: Arc<T>,
    codec: Arc<C>,
    topics: Vec<String>,
    poll_timeout: Duration,
}

impl<T: Transport> Consumer<T> {
    pub fn new(transport: Arc<T>, config: &BusConfig) -> Self {
        Self::with_codec(transport, JsonPayloadCodec, config)
    }
}

impl<T: Transport, C: PayloadCodec> Consumer<T, C> {
    pub fn with_codec(transport: Arc<T>, codec: C, config: &BusConfig) -> Self {
        Self {
            transport,
            codec: Arc::new(codec),
            topics: config.topics.clone(),
            poll_timeout: config.poll_timeout(),
        }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    fn decode(&self, delivery: &Delivery) -> Result<Message, ClientError> {
        let mapping = self.codec.decode_payload(&delivery.payload)?;
        Ok(Registry::global().decode(&mapping)?)
    }

    /// Starts the consumption loop on its own task.
    ///
    /// A payload that fails to decode is logged and skipped. Must be called
    /// from within a tokio runtime.
    pub fn spawn<H: MessageHandler>(self, mut handler: H) -> ConsumerHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let task = tokio::spawn(async move {
            tracing::info!("Consumer started on {:?}", self.topics);
            let mut stats = ConsumerStats::default();

            while !flag.load(Ordering::Acquire) {
                let delivery = match self.transport.poll(&self.topics, self.poll_timeout).await {
                    Ok(Some(delivery)) => delivery,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!("Poll failed: {}", e);
                        tokio::time::sleep(self.poll_timeout).await;
                        continue;
                    }
                };

                match self.decode(&delivery) {
                    Ok(message) => {
                        tracing::debug!(
                            message_type = %message.message_type(),
                            message_id = message.message_id(),
                            topic = delivery.topic.as_str(),
                            "Message received"
                        );
                        stats.delivered += 1;
                        handler.handle_message(&delivery.topic, message);
                    }
                    Err(e) => {
                        tracing::warn!(topic = delivery.topic.as_str(), "Skipping message: {}", e);
                        stats.rejected += 1;
                    }
                }
            }

            tracing::info!(
                "Consumer stopped after {} messages ({} rejected)",
                stats.delivered,
                stats.rejected
            );
            stats
        });

        ConsumerHandle { stop, task }
    }
}

/// Control handle for a running consumer.
pub struct ConsumerHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<ConsumerStats>,
}

impl ConsumerHandle {
    /// Asks the loop to stop after the current poll and waits for it.
    pub async fn shutdown(self) -> Result<ConsumerStats, ClientError> {
        self.stop.store(true, Ordering::Release);
        Ok(self.task.await?)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
