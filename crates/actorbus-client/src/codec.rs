//! Payload codec seam.
//!
//! The bus carries bytes; envelopes project to mappings. A [`PayloadCodec`]
//! sits between the two. Deployments with a schema registry plug in their
//! own; [`JsonPayloadCodec`] is enough for in-process use and tests.

use crate::error::ClientError;
use actorbus_core::Mapping;

pub trait PayloadCodec: Send + Sync + 'static {
    fn encode_payload(&self, mapping: &Mapping) -> Result<Vec<u8>, ClientError>;

    fn decode_payload(&self, bytes: &[u8]) -> Result<Mapping, ClientError>;
}

/// Encodes mappings as JSON. Byte fields survive as tagged arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadCodec;

impl PayloadCodec for JsonPayloadCodec {
    fn encode_payload(&self, mapping: &Mapping) -> Result<Vec<u8>, ClientError> {
        Ok(serde_json::to_vec(mapping)?)
    }

    fn decode_payload(&self, bytes: &[u8]) -> Result<Mapping, ClientError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
