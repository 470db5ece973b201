//! Sending envelopes.

use crate::codec::{JsonPayloadCodec, PayloadCodec};
use crate::config::BusConfig;
use crate::error::ClientError;
use crate::transport::Transport;
use actorbus_core::{CorrelationId, Message};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Encodes envelopes and hands them to a [`Transport`].
///
/// Envelopes that fail validation are refused before anything reaches the
/// bus.
pub struct Producer<T, C = JsonPayloadCodec> {
    transport: Arc<T>,
    codec: Arc<C>,
    produce_timeout: Duration,
}

impl<T, C> Clone for Producer<T, C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            codec: Arc::clone(&self.codec),
            produce_timeout: self.produce_timeout,
        }
    }
}

impl<T: Transport> Producer<T> {
    pub fn new(transport: Arc<T>, config: &BusConfig) -> Self {
        Self::with_codec(transport, JsonPayloadCodec, config)
    }
}

impl<T: Transport, C: PayloadCodec> Producer<T, C> {
    pub fn with_codec(transport: Arc<T>, codec: C, config: &BusConfig) -> Self {
        Self {
            transport,
            codec: Arc::new(codec),
            produce_timeout: config.produce_timeout(),
        }
    }

    fn encode(&self, message: &Message) -> Result<Vec<u8>, ClientError> {
        let mapping = message.to_mapping()?;
        self.codec.encode_payload(&mapping)
    }

    /// Sends `message` and waits for the bus to acknowledge it.
    pub async fn produce_sync(
        &self,
        topic: &str,
        message: &Message,
    ) -> Result<CorrelationId, ClientError> {
        let payload = match self.encode(message) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    message_type = %message.message_type(),
                    message_id = message.message_id(),
                    "Refusing to produce: {}",
                    e
                );
                return Err(e);
            }
        };

        let sent = tokio::time::timeout(self.produce_timeout, self.transport.send(topic, payload))
            .await
            .unwrap_or(Err(ClientError::Timeout(self.produce_timeout)));
        log_outcome(topic, message, &sent);
        sent.map(|()| message.correlation_id())
    }

    /// Queues `message` for sending without waiting for acknowledgment.
    ///
    /// Encoding happens before this returns, so an invalid envelope is still
    /// reported to the caller. The send itself runs on the tokio runtime and
    /// its outcome is only logged. Must be called from within a runtime.
    pub fn produce(
        &self,
        topic: impl Into<String>,
        message: Message,
    ) -> Result<JoinHandle<()>, ClientError> {
        let payload = self.encode(&message)?;
        let topic = topic.into();
        let transport = Arc::clone(&self.transport);
        let timeout = self.produce_timeout;
        Ok(tokio::spawn(async move {
            let sent = tokio::time::timeout(timeout, transport.send(&topic, payload))
                .await
                .unwrap_or(Err(ClientError::Timeout(timeout)));
            log_outcome(&topic, &message, &sent);
        }))
    }
}

fn log_outcome(topic: &str, message: &Message, sent: &Result<(), ClientError>) {
    match sent {
        Ok(()) => tracing::debug!(
            message_type = %message.message_type(),
            message_id = message.message_id(),
            correlation_id = %message.correlation_id(),
            topic,
            "Message delivered"
        ),
        Err(e) => tracing::warn!(
            message_type = %message.message_type(),
            message_id = message.message_id(),
            topic,
            "Message delivery failed: {}",
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Delivery, MemoryTransport};
    use actorbus_core::{Query, RemoveReservation, decode};
    use std::future::Future;

    fn config() -> BusConfig {
        BusConfig {
            topics: vec!["topic1".into()],
            produce_timeout_ms: 50,
            ..Default::default()
        }
    }

    fn query() -> Message {
        let mut query = Query::new("msg1");
        query.callback_topic = "topic".into();
        query.into()
    }

    #[tokio::test]
    async fn produce_sync_returns_correlation_id() {
        let bus = Arc::new(MemoryTransport::new());
        let producer = Producer::new(Arc::clone(&bus), &config());
        let message = query();

        let id = producer.produce_sync("topic1", &message).await.unwrap();
        assert_eq!(id, message.correlation_id());

        let delivery = bus
            .poll(&["topic1".to_string()], Duration::from_millis(10))
            .await
            .unwrap()
            .unwrap();
        let mapping = JsonPayloadCodec.decode_payload(&delivery.payload).unwrap();
        assert_eq!(decode(&mapping).unwrap(), message);
    }

    #[tokio::test]
    async fn invalid_envelopes_never_reach_the_bus() {
        let bus = Arc::new(MemoryTransport::new());
        let producer = Producer::new(Arc::clone(&bus), &config());
        let incomplete: Message = RemoveReservation::new("msg1").into();

        assert!(matches!(
            producer.produce_sync("topic1", &incomplete).await,
            Err(ClientError::Codec(_))
        ));
        assert!(producer.produce("topic1", incomplete).is_err());
        assert_eq!(bus.pending("topic1").await, 0);
    }

    #[tokio::test]
    async fn fire_and_forget() {
        let bus = Arc::new(MemoryTransport::new());
        let producer = Producer::new(Arc::clone(&bus), &config());
        producer.produce("topic1", query()).unwrap().await.unwrap();
        assert_eq!(bus.pending("topic1").await, 1);
    }

    /// A bus that never acknowledges.
    struct Stalled;

    impl Transport for Stalled {
        fn send(
            &self,
            _topic: &str,
            _payload: Vec<u8>,
        ) -> impl Future<Output = Result<(), ClientError>> + Send {
            std::future::pending()
        }

        async fn poll(
            &self,
            _topics: &[String],
            _timeout: Duration,
        ) -> Result<Option<Delivery>, ClientError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn unacknowledged_send_times_out() {
        let producer = Producer::new(Arc::new(Stalled), &config());
        assert!(matches!(
            producer.produce_sync("topic1", &query()).await,
            Err(ClientError::Timeout(_))
        ));
    }
}
