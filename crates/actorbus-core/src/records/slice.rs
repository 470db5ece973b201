use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::records::AuthRecord;
use crate::value::{Mapping, Properties};

/// A slice as carried by slice management messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceRecord {
    pub slice_name: String,
    pub guid: Option<String>,
    pub slice_id: Option<String>,
    pub owner: Option<AuthRecord>,
    pub description: Option<String>,
    pub config_properties: Option<Properties>,
    pub request_properties: Option<Properties>,
    pub resource_properties: Option<Properties>,
    pub resource_type: Option<String>,
    pub client_slice: Option<bool>,
    pub broker_client_slice: Option<bool>,
}

impl SliceRecord {
    pub fn new(slice_name: impl Into<String>) -> Self {
        Self {
            slice_name: slice_name.into(),
            ..Default::default()
        }
    }
}

impl Record for SliceRecord {
    const RECORD: &'static str = "Slice";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            slice_name: fields.required_str("slice_name")?,
            guid: fields.optional_str("guid")?,
            slice_id: fields.optional_str("slice_id")?,
            owner: fields.optional_record("owner")?,
            description: fields.optional_str("description")?,
            config_properties: fields.optional_properties("config_properties")?,
            request_properties: fields.optional_properties("request_properties")?,
            resource_properties: fields.optional_properties("resource_properties")?,
            resource_type: fields.optional_str("resource_type")?,
            client_slice: fields.optional_bool("client_slice")?,
            broker_client_slice: fields.optional_bool("broker_client_slice")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("slice_name", self.slice_name.as_str())
            .put_opt("guid", self.guid.clone())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt_record("owner", self.owner.as_ref())
            .put_opt("description", self.description.clone())
            .put_opt("config_properties", self.config_properties.clone())
            .put_opt("request_properties", self.request_properties.clone())
            .put_opt("resource_properties", self.resource_properties.clone())
            .put_opt("resource_type", self.resource_type.clone())
            .put_opt("client_slice", self.client_slice)
            .put_opt("broker_client_slice", self.broker_client_slice)
            .finish()
    }
}
