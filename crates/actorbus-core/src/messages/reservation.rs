//! Reservation management requests and their replies.

use crate::envelope::{EnvelopeFields, MessageType, envelope};
use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter};
use crate::records::{AuthRecord, ReservationStateRecord, ResultRecord};
use crate::reservation::ReservationMng;

envelope! {
    /// Lists reservations, optionally narrowed by slice, id or state.
    pub struct GetReservationsRequest {
        pub callback_topic: String,
        pub guid: String,
        pub slice_id: Option<String>,
        pub reservation_id: Option<String>,
        pub reservation_state: Option<i32>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for GetReservationsRequest {
    const MESSAGE_TYPE: MessageType = MessageType::GetReservationsRequest;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_id: fields.optional_str("slice_id")?,
            reservation_id: fields.optional_str("reservation_id")?,
            reservation_state: fields.optional_i32("reservation_state")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt("reservation_id", self.reservation_id.clone())
            .put_opt("reservation_state", self.reservation_state)
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty() && !self.guid.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Reply to [`GetReservationsRequest`]; each entry keeps its own shape.
    pub struct GetReservationsResponse {
        pub status: ResultRecord,
        pub reservations: Option<Vec<ReservationMng>>,
    }
}

impl EnvelopeFields for GetReservationsResponse {
    const MESSAGE_TYPE: MessageType = MessageType::GetReservationsResponse;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            reservations: fields.optional_record_list("reservations")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("reservations", self.reservations.as_deref())
    }
}

envelope! {
    pub struct GetReservationsStateRequest {
        pub callback_topic: String,
        pub guid: String,
        pub reservation_ids: Option<Vec<String>>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for GetReservationsStateRequest {
    const MESSAGE_TYPE: MessageType = MessageType::GetReservationsStateRequest;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            reservation_ids: fields.optional_str_list("reservation_ids")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("reservation_ids", self.reservation_ids.clone())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty() && !self.guid.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    pub struct GetReservationsStateResponse {
        pub status: ResultRecord,
        pub reservation_states: Option<Vec<ReservationStateRecord>>,
    }
}

impl EnvelopeFields for GetReservationsStateResponse {
    const MESSAGE_TYPE: MessageType = MessageType::GetReservationsStateResponse;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            reservation_states: fields.optional_record_list("reservation_states")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("reservation_states", self.reservation_states.as_deref())
    }
}

envelope! {
    pub struct AddReservation {
        pub callback_topic: String,
        pub guid: String,
        pub reservation_obj: Option<ReservationMng>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for AddReservation {
    const MESSAGE_TYPE: MessageType = MessageType::AddReservation;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            reservation_obj: fields.optional_record("reservation_obj")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt_record("reservation_obj", self.reservation_obj.as_ref())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.reservation_obj.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    pub struct RemoveReservation {
        pub callback_topic: String,
        pub guid: String,
        pub reservation_id: Option<String>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for RemoveReservation {
    const MESSAGE_TYPE: MessageType = MessageType::RemoveReservation;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            reservation_id: fields.optional_str("reservation_id")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("reservation_id", self.reservation_id.clone())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.reservation_id.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Closes one reservation, or every reservation in a slice.
    pub struct CloseReservations {
        pub callback_topic: String,
        pub guid: String,
        pub slice_id: Option<String>,
        pub reservation_id: Option<String>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for CloseReservations {
    const MESSAGE_TYPE: MessageType = MessageType::CloseReservations;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_id: fields.optional_str("slice_id")?,
            reservation_id: fields.optional_str("reservation_id")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt("reservation_id", self.reservation_id.clone())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.auth.is_some()
            && (self.slice_id.is_some() || self.reservation_id.is_some())
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    pub struct UpdateReservation {
        pub callback_topic: String,
        pub guid: String,
        pub reservation_obj: Option<ReservationMng>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for UpdateReservation {
    const MESSAGE_TYPE: MessageType = MessageType::UpdateReservation;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            reservation_obj: fields.optional_record("reservation_obj")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt_record("reservation_obj", self.reservation_obj.as_ref())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.reservation_obj.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Reply to the reservation add/remove/close/update requests.
    pub struct ResultReservation {
        pub status: ResultRecord,
        pub reservations: Option<Vec<ReservationMng>>,
    }
}

impl EnvelopeFields for ResultReservation {
    const MESSAGE_TYPE: MessageType = MessageType::ResultReservation;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            reservations: fields.optional_record_list("reservations")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("reservations", self.reservations.as_deref())
    }
}

envelope! {
    pub struct ResultReservationState {
        pub status: ResultRecord,
        pub reservation_states: Option<Vec<ReservationStateRecord>>,
    }
}

impl EnvelopeFields for ResultReservationState {
    const MESSAGE_TYPE: MessageType = MessageType::ResultReservationState;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            reservation_states: fields.optional_record_list("reservation_states")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("reservation_states", self.reservation_states.as_deref())
    }
}
