//! Ticketing RPCs between orchestrators, brokers and authorities.

use crate::envelope::{EnvelopeFields, MessageType, envelope};
use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter};
use crate::records::{AuthRecord, ResultRecord, UpdateDataRecord};
use crate::reservation::ReservationMng;

envelope! {
    /// Asks a broker to hand over resources it already holds for a reservation.
    pub struct ClaimResources {
        pub guid: String,
        pub broker_id: String,
        pub reservation_id: String,
        pub slice_id: Option<String>,
        pub auth: Option<AuthRecord>,
        pub callback_topic: String,
    }
}

impl EnvelopeFields for ClaimResources {
    const MESSAGE_TYPE: MessageType = MessageType::ClaimResources;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            guid: fields.required_non_empty_str("guid")?,
            broker_id: fields.required_str("broker_id")?,
            reservation_id: fields.required_str("reservation_id")?,
            slice_id: fields.optional_str_or_null_sentinel("slice_id")?,
            auth: fields.optional_record_or_null_sentinel("auth")?,
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("guid", self.guid.as_str())
            .put("broker_id", self.broker_id.as_str())
            .put("reservation_id", self.reservation_id.as_str())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt_record("auth", self.auth.as_ref())
            .put("callback_topic", self.callback_topic.as_str())
    }

    fn validate_fields(&self) -> bool {
        !self.guid.is_empty() && !self.callback_topic.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Reply to [`ClaimResources`].
    pub struct ClaimResourcesResponse {
        pub status: ResultRecord,
        pub reservation: Option<ReservationMng>,
    }
}

impl EnvelopeFields for ClaimResourcesResponse {
    const MESSAGE_TYPE: MessageType = MessageType::ClaimResourcesResponse;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            reservation: fields.optional_record("reservation")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_record("reservation", self.reservation.as_ref())
    }
}

envelope! {
    /// Requests a ticket for a reservation from a broker.
    pub struct Claim {
        pub callback_topic: String,
        pub reservation: ReservationMng,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for Claim {
    const MESSAGE_TYPE: MessageType = MessageType::Claim;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            reservation: fields.required_record("reservation")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put_record("reservation", &self.reservation)
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Presents a ticket to an authority to obtain a lease.
    pub struct Redeem {
        pub callback_topic: String,
        pub reservation: ReservationMng,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for Redeem {
    const MESSAGE_TYPE: MessageType = MessageType::Redeem;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            reservation: fields.required_record("reservation")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put_record("reservation", &self.reservation)
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Delivers a new or extended ticket back to the requester.
    pub struct UpdateTicket {
        pub callback_topic: String,
        pub reservation: ReservationMng,
        pub update_data: UpdateDataRecord,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for UpdateTicket {
    const MESSAGE_TYPE: MessageType = MessageType::UpdateTicket;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            reservation: fields.required_record("reservation")?,
            update_data: fields.required_record("update_data")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put_record("reservation", &self.reservation)
            .put_record("update_data", &self.update_data)
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}
