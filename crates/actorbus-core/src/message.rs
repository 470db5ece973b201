//! The closed set of envelopes as one type.
//!
//! Consumers receive a [`Message`] and match on it; producers wrap any
//! concrete envelope with `.into()`.

use crate::envelope::{CorrelationId, Envelope, EnvelopeFields, MessageType};
use crate::error::CodecError;
use crate::messages::*;
use crate::value::Mapping;

macro_rules! messages {
    ($($variant:ident),* $(,)?) => {
        /// Any envelope known to this crate.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Message {
            $( $variant($variant), )*
        }

        impl Message {
            /// An empty envelope of the given type, ready to be populated.
            pub fn empty(message_type: MessageType) -> Self {
                match message_type {
                    $( MessageType::$variant => Message::$variant($variant::default()), )*
                }
            }

            pub fn as_envelope(&self) -> &dyn Envelope {
                match self {
                    $( Message::$variant(inner) => inner, )*
                }
            }

            pub fn as_envelope_mut(&mut self) -> &mut dyn Envelope {
                match self {
                    $( Message::$variant(inner) => inner, )*
                }
            }
        }

        /// Constructor for every variant, keyed by its type.
        pub(crate) const FACTORIES: &[(MessageType, fn() -> Message)] = &[
            $( (<$variant as EnvelopeFields>::MESSAGE_TYPE, empty::<$variant>), )*
        ];

        $(
            impl From<$variant> for Message {
                fn from(inner: $variant) -> Self {
                    Message::$variant(inner)
                }
            }
        )*
    };
}

fn empty<E: Default + Into<Message>>() -> Message {
    E::default().into()
}

messages! {
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

impl Message {
    pub fn message_type(&self) -> MessageType {
        self.as_envelope().message_type()
    }

    pub fn discriminator(&self) -> &'static str {
        self.as_envelope().discriminator()
    }

    pub fn message_id(&self) -> &str {
        self.as_envelope().message_id()
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.as_envelope().correlation_id()
    }

    pub fn callback_topic(&self) -> Option<&str> {
        self.as_envelope().callback_topic()
    }

    pub fn validate(&self) -> bool {
        self.as_envelope().validate()
    }

    pub fn to_mapping(&self) -> Result<Mapping, CodecError> {
        self.as_envelope().to_mapping()
    }

    pub fn populate_from_mapping(&mut self, mapping: &Mapping) -> Result<(), CodecError> {
        self.as_envelope_mut().populate_from_mapping(mapping)
    }
}
