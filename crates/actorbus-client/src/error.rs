//! Client errors.

use actorbus_core::CodecError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The envelope could not be encoded, or an incoming mapping decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// The payload codec rejected the bytes or the mapping.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no acknowledgment from the bus within {0:?}")]
    Timeout(Duration),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("consumer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
