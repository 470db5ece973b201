//! Small records describing reservation state and ordering.

use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::value::{Mapping, Properties};

/// Current and pending state of one reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationStateRecord {
    pub reservation_id: String,
    pub state: i32,
    pub pending_state: Option<i32>,
}

impl Record for ReservationStateRecord {
    const RECORD: &'static str = "ReservationState";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            reservation_id: fields.required_str("reservation_id")?,
            state: fields.required_i32("state")?,
            pending_state: fields.optional_i32("pending_state")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("reservation_id", self.reservation_id.as_str())
            .put("state", self.state)
            .put_opt("pending_state", self.pending_state)
            .finish()
    }
}

/// A reservation that must be redeemed before a lease can proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPredecessorRecord {
    pub reservation_id: String,
    /// Properties forwarded from the predecessor.
    pub filter: Option<Properties>,
}

impl Record for ReservationPredecessorRecord {
    const RECORD: &'static str = "ReservationPredecessor";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            reservation_id: fields.required_str("reservation_id")?,
            filter: fields.optional_properties("filter")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("reservation_id", self.reservation_id.as_str())
            .put_opt("filter", self.filter.clone())
            .finish()
    }
}
