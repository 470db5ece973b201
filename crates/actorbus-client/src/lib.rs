//! Producer and consumer shims for the actor control-plane bus.
//!
//! The bus client itself stays behind the [`Transport`] trait; this crate
//! adds envelope encoding on the way out and registry decoding on the way
//! in. [`MemoryTransport`] stands in for a real bus in tests and demos.

mod codec;
mod config;
mod consumer;
mod error;
mod producer;
mod transport;

pub use codec::{JsonPayloadCodec, PayloadCodec};
pub use config::{BusConfig, OffsetReset};
pub use consumer::{Consumer, ConsumerHandle, ConsumerStats, MessageHandler};
pub use error::ClientError;
pub use producer::Producer;
pub use transport::{Delivery, MemoryTransport, Transport};
