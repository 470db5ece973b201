//! The envelope contract shared by every message variant.

use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter};
use crate::value::Mapping;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Key holding the caller-assigned correlation id on the wire.
pub const MESSAGE_ID_KEY: &str = "message_id";

/// Process-local token identifying one in-memory envelope.
///
/// Generated fresh for every envelope built in this process and never
/// written to a mapping. Producers use it to match acknowledgments to sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Discriminator of every known envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageType {
    Query,
    QueryResult,
    FailedRpc,
    ClaimResources,
    ClaimResourcesResponse,
    Claim,
    Redeem,
    UpdateTicket,
    GetSlicesRequest,
    GetSlicesResponse,
    AddSlice,
    RemoveSlice,
    UpdateSlice,
    ResultSlice,
    GetReservationsRequest,
    GetReservationsResponse,
    GetReservationsStateRequest,
    GetReservationsStateResponse,
    AddReservation,
    RemoveReservation,
    CloseReservations,
    UpdateReservation,
    ResultReservation,
    ResultReservationState,
    StatusResponse,
}

impl MessageType {
    pub const ALL: [MessageType; 25] = [
        MessageType::Query,
        MessageType::QueryResult,
        MessageType::FailedRpc,
        MessageType::ClaimResources,
        MessageType::ClaimResourcesResponse,
        MessageType::Claim,
        MessageType::Redeem,
        MessageType::UpdateTicket,
        MessageType::GetSlicesRequest,
        MessageType::GetSlicesResponse,
        MessageType::AddSlice,
        MessageType::RemoveSlice,
        MessageType::UpdateSlice,
        MessageType::ResultSlice,
        MessageType::GetReservationsRequest,
        MessageType::GetReservationsResponse,
        MessageType::GetReservationsStateRequest,
        MessageType::GetReservationsStateResponse,
        MessageType::AddReservation,
        MessageType::RemoveReservation,
        MessageType::CloseReservations,
        MessageType::UpdateReservation,
        MessageType::ResultReservation,
        MessageType::ResultReservationState,
        MessageType::StatusResponse,
    ];

    /// The exact `name` string carried on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Query => "Query",
            MessageType::QueryResult => "QueryResult",
            MessageType::FailedRpc => "FailedRPC",
            MessageType::ClaimResources => "ClaimResources",
            MessageType::ClaimResourcesResponse => "ClaimResourcesResponse",
            MessageType::Claim => "Claim",
            MessageType::Redeem => "Redeem",
            MessageType::UpdateTicket => "UpdateTicket",
            MessageType::GetSlicesRequest => "GetSlicesRequest",
            MessageType::GetSlicesResponse => "GetSlicesResponse",
            MessageType::AddSlice => "AddSlice",
            MessageType::RemoveSlice => "RemoveSlice",
            MessageType::UpdateSlice => "UpdateSlice",
            MessageType::ResultSlice => "ResultSlice",
            MessageType::GetReservationsRequest => "GetReservationsRequest",
            MessageType::GetReservationsResponse => "GetReservationsResponse",
            MessageType::GetReservationsStateRequest => "GetReservationsStateRequest",
            MessageType::GetReservationsStateResponse => "GetReservationsStateResponse",
            MessageType::AddReservation => "AddReservation",
            MessageType::RemoveReservation => "RemoveReservation",
            MessageType::CloseReservations => "CloseReservations",
            MessageType::UpdateReservation => "UpdateReservation",
            MessageType::ResultReservation => "ResultReservation",
            MessageType::ResultReservationState => "ResultReservationState",
            MessageType::StatusResponse => "StatusResponse",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CodecError::UnknownMessageType(s.to_string()))
    }
}

/// Common behavior of every message exchanged over the bus.
pub trait Envelope: fmt::Debug + Send + Sync {
    fn message_type(&self) -> MessageType;

    /// The fixed `name` tag.
    fn discriminator(&self) -> &'static str {
        self.message_type().as_str()
    }

    fn message_id(&self) -> &str;

    fn correlation_id(&self) -> CorrelationId;

    /// Topic the sender expects replies on, for request-style variants.
    fn callback_topic(&self) -> Option<&str>;

    /// Whether every mandatory field of this variant is set.
    fn validate(&self) -> bool;

    /// Projects the envelope onto its wire mapping.
    ///
    /// Fails with [`CodecError::Validation`] when [`validate`](Self::validate)
    /// reports the envelope incomplete.
    fn to_mapping(&self) -> Result<Mapping, CodecError>;

    /// Replaces every wire field with the contents of `mapping`.
    ///
    /// On error `self` is left untouched. The correlation id is kept.
    fn populate_from_mapping(&mut self, mapping: &Mapping) -> Result<(), CodecError>;
}

/// Variant-specific half of the envelope contract.
///
/// `name` and `message_id` are handled by [`encode`] and [`decode`]; an
/// implementation only deals with its own fields.
pub trait EnvelopeFields: Sized {
    const MESSAGE_TYPE: MessageType;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError>;

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter;

    fn validate_fields(&self) -> bool {
        true
    }

    fn reply_topic(&self) -> Option<&str> {
        None
    }
}

pub(crate) fn encode<E: EnvelopeFields + Envelope>(envelope: &E) -> Result<Mapping, CodecError> {
    if !envelope.validate() {
        return Err(CodecError::Validation {
            message_type: E::MESSAGE_TYPE.as_str(),
        });
    }
    let writer = MappingWriter::tagged(E::MESSAGE_TYPE.as_str())
        .put(MESSAGE_ID_KEY, envelope.message_id());
    Ok(envelope.encode_fields(writer).finish())
}

pub(crate) fn decode<E: EnvelopeFields>(mapping: &Mapping) -> Result<E, CodecError> {
    let fields = FieldReader::new(E::MESSAGE_TYPE.as_str(), mapping);
    fields.expect_discriminator(E::MESSAGE_TYPE.as_str())?;
    let message_id = fields.required_str(MESSAGE_ID_KEY)?;
    E::decode_fields(message_id, &fields)
}

/// Declares an envelope struct and wires it into [`Envelope`].
///
/// Every declared field must implement `Default` and `PartialEq`. Equality
/// compares wire fields only, never the correlation id.
macro_rules! envelope {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $fty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            pub message_id: String,
            $( $(#[$fmeta])* pub $field: $fty, )*
            id: $crate::envelope::CorrelationId,
        }

        impl $name {
            pub fn new(message_id: impl Into<String>) -> Self {
                Self {
                    message_id: message_id.into(),
                    $( $field: Default::default(), )*
                    id: $crate::envelope::CorrelationId::new(),
                }
            }

            /// Decodes a mapping that must carry this variant's discriminator.
            pub fn from_mapping(
                mapping: &$crate::value::Mapping,
            ) -> Result<Self, $crate::error::CodecError> {
                $crate::envelope::decode(mapping)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(String::new())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.message_id == other.message_id $( && self.$field == other.$field )*
            }
        }

        impl $crate::envelope::Envelope for $name {
            fn message_type(&self) -> $crate::envelope::MessageType {
                <Self as $crate::envelope::EnvelopeFields>::MESSAGE_TYPE
            }

            fn message_id(&self) -> &str {
                &self.message_id
            }

            fn correlation_id(&self) -> $crate::envelope::CorrelationId {
                self.id
            }

            fn callback_topic(&self) -> Option<&str> {
                $crate::envelope::EnvelopeFields::reply_topic(self)
            }

            fn validate(&self) -> bool {
                $crate::envelope::EnvelopeFields::validate_fields(self)
            }

            fn to_mapping(&self) -> Result<$crate::value::Mapping, $crate::error::CodecError> {
                $crate::envelope::encode(self)
            }

            fn populate_from_mapping(
                &mut self,
                mapping: &$crate::value::Mapping,
            ) -> Result<(), $crate::error::CodecError> {
                let id = self.id;
                *self = $crate::envelope::decode(mapping)?;
                self.id = id;
                Ok(())
            }
        }
    };
}

pub(crate) use envelope;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_parse_back() {
        for message_type in MessageType::ALL {
            let parsed: MessageType = message_type.as_str().parse().unwrap();
            assert_eq!(parsed, message_type);
        }
    }

    #[test]
    fn failed_rpc_keeps_wire_spelling() {
        assert_eq!(MessageType::FailedRpc.as_str(), "FailedRPC");
        assert_eq!("FailedRPC".parse::<MessageType>().unwrap(), MessageType::FailedRpc);
    }

    #[test]
    fn unknown_discriminator() {
        assert_eq!(
            "NotARealType".parse::<MessageType>(),
            Err(CodecError::UnknownMessageType("NotARealType".into()))
        );
    }

    #[test]
    fn correlation_ids_are_fresh() {
        assert_ne!(CorrelationId::new(), CorrelationId::new());
    }
}
