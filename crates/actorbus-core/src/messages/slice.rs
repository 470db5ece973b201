//! Slice management requests and their replies.

use crate::envelope::{EnvelopeFields, MessageType, envelope};
use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter};
use crate::records::{AuthRecord, ResultRecord, SliceRecord};

envelope! {
    pub struct GetSlicesRequest {
        pub callback_topic: String,
        pub guid: String,
        /// Restricts the answer to one slice.
        pub slice_id: Option<String>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for GetSlicesRequest {
    const MESSAGE_TYPE: MessageType = MessageType::GetSlicesRequest;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_id: fields.optional_str("slice_id")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("slice_id", self.slice_id.clone())
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
    pub struct GetSlicesResponse {
        pub status: ResultRecord,
        pub slices: Option<Vec<SliceRecord>>,
    }
}

impl EnvelopeFields for GetSlicesResponse {
    const MESSAGE_TYPE: MessageType = MessageType::GetSlicesResponse;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            slices: fields.optional_record_list("slices")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("slices", self.slices.as_deref())
    }
}

envelope! {
    pub struct AddSlice {
        pub callback_topic: String,
        pub guid: String,
        pub slice_obj: Option<SliceRecord>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for AddSlice {
    const MESSAGE_TYPE: MessageType = MessageType::AddSlice;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_obj: fields.optional_record("slice_obj")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt_record("slice_obj", self.slice_obj.as_ref())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.slice_obj.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    pub struct RemoveSlice {
        pub callback_topic: String,
        pub guid: String,
        pub slice_id: Option<String>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for RemoveSlice {
    const MESSAGE_TYPE: MessageType = MessageType::RemoveSlice;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_id: fields.optional_str("slice_id")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.slice_id.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    pub struct UpdateSlice {
        pub callback_topic: String,
        pub guid: String,
        pub slice_obj: Option<SliceRecord>,
        pub auth: Option<AuthRecord>,
    }
}

impl EnvelopeFields for UpdateSlice {
    const MESSAGE_TYPE: MessageType = MessageType::UpdateSlice;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            callback_topic: fields.required_non_empty_str("callback_topic")?,
            guid: fields.required_non_empty_str("guid")?,
            slice_obj: fields.optional_record("slice_obj")?,
            auth: fields.optional_record("auth")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put("callback_topic", self.callback_topic.as_str())
            .put("guid", self.guid.as_str())
            .put_opt_record("slice_obj", self.slice_obj.as_ref())
            .put_opt_record("auth", self.auth.as_ref())
    }

    fn validate_fields(&self) -> bool {
        !self.callback_topic.is_empty()
            && !self.guid.is_empty()
            && self.slice_obj.is_some()
            && self.auth.is_some()
    }

    fn reply_topic(&self) -> Option<&str> {
        Some(&self.callback_topic)
    }
}

envelope! {
    /// Reply to the slice add/remove/update requests.
    pub struct ResultSlice {
        pub status: ResultRecord,
        pub slices: Option<Vec<SliceRecord>>,
    }
}

impl EnvelopeFields for ResultSlice {
    const MESSAGE_TYPE: MessageType = MessageType::ResultSlice;

    fn decode_fields(message_id: String, fields: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: fields.required_record("status")?,
            slices: fields.optional_record_list("slices")?,
            ..Self::new(message_id)
        })
    }

    fn encode_fields(&self, writer: MappingWriter) -> MappingWriter {
        writer
            .put_record("status", &self.status)
            .put_opt_records("slices", self.slices.as_deref())
    }
}
