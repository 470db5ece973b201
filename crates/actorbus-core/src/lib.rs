//! Message envelopes for the actor control-plane bus.
//!
//! Actors exchange typed envelopes over a partitioned message bus. Each
//! envelope projects to a string-keyed [`Mapping`] whose `name` key names its
//! type; the bus payload codec turns mappings into bytes. This crate owns the
//! mapping side only: envelope types, the records nested inside them and the
//! [`Registry`] that picks a type for an incoming mapping.
//!
//! ```
//! use actorbus_core::{Envelope, Message, Query, Registry};
//!
//! let mut query = Query::new("msg-1");
//! query.callback_topic = "orchestrator-topic".into();
//! let mapping = query.to_mapping().unwrap();
//!
//! let decoded = Registry::global().decode(&mapping).unwrap();
//! assert_eq!(decoded, Message::from(query));
//! ```

mod envelope;
mod error;
mod fields;
mod message;
mod messages;
mod records;
mod registry;
mod reservation;
mod value;

pub use envelope::{CorrelationId, Envelope, MESSAGE_ID_KEY, MessageType};
pub use error::CodecError;
pub use fields::{FieldReader, MappingWriter, NAME_KEY, Record};
pub use message::Message;
pub use messages::*;
pub use records::*;
pub use registry::{Registry, decode};
pub use reservation::{
    LEASE_RESERVATION_TAG, LeaseReservation, RESERVATION_TAG, ReservationCore, ReservationKind,
    ReservationMng, TICKET_RESERVATION_TAG, TicketReservation,
};
pub use value::{Mapping, Properties, Value};
