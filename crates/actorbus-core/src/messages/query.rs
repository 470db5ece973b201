//! Generic queries, RPC failure reports and status replies.

use crate::envelope::{EnvelopeFields, MessageType, envelope};
use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter};
use crate::records::{AuthRecord, ResultRecord};
use crate::value::Properties;

envelope! {
    /// Free-form query addressed to another actor.
    pub struct Query {
        pub callback_topic: String,
        pub properties: Properties,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for Query {
    const MESSAGE_TYPE: MessageType = MessageType::Query;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            properties: fields.properties("properties")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("properties", self.properties.clone())
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
    /// Answer to a [`Query`].
    pub struct QueryResult {
        pub request_id: String,
        pub properties: Properties,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for QueryResult {
    const MESSAGE_TYPE: MessageType = MessageType::QueryResult;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            request_id: fields.required_str("request_id")?,
            properties: fields.properties("properties")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("request_id", self.request_id.as_str())
            .put("properties", self.properties.clone())
            .put_opt_record("auth", self.auth.as_ref())
    }
}

envelope! {
    /// Reports that an earlier request could not be processed.
    pub struct FailedRpc {
        pub request_id: String,
        /// Numeric code of the failed request kind.
        pub request_type: i32,
        pub reservation_id: Option<String>,
        pub error_details: String,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for FailedRpc {
    const MESSAGE_TYPE: MessageType = MessageType::FailedRpc;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            request_id: fields.required_str("request_id")?,
            request_type: fields.required_i32("request_type")?,
            reservation_id: fields.optional_str("reservation_id")?,
            error_details: fields.required_str("error_details")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("request_id", self.request_id.as_str())
            .put("request_type", self.request_type)
            .put_opt("reservation_id", self.reservation_id.clone())
            .put("error_details", self.error_details.as_str())
            .put_opt_record("auth", self.auth.as_ref())
    }
}

envelope! {
    /// Plain status reply with an optional textual result.
    pub struct StatusResponse {
        pub status: ResultRecord,
        pub result: Option<String>,
    }
}

impl EnvelopeFields for StatusResponse {
    const MESSAGE_TYPE: MessageType = MessageType::StatusResponse;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            result: fields.optional_str("result")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt("result", self.result.clone())
    }
}
