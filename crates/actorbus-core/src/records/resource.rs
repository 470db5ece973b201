//! Resource sets carried inside reservations.

use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::value::{Mapping, Properties};

/// Property bags describing a resource request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDataRecord {
    pub request_properties: Option<Properties>,
    pub config_properties: Option<Properties>,
    pub resource_properties: Option<Properties>,
    pub local_properties: Option<Properties>,
}

impl Record for ResourceDataRecord {
    const RECORD: &'static str = "ResourceData";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            request_properties: fields.optional_properties("request_properties")?,
            config_properties: fields.optional_properties("config_properties")?,
            resource_properties: fields.optional_properties("resource_properties")?,
            local_properties: fields.optional_properties("local_properties")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put_opt("request_properties", self.request_properties.clone())
            .put_opt("config_properties", self.config_properties.clone())
            .put_opt("resource_properties", self.resource_properties.clone())
            .put_opt("local_properties", self.local_properties.clone())
            .finish()
    }
}

/// A number of units of one resource type.
///
/// `concrete` holds a capability object serialized by the actor policy
/// layer. It is copied through byte for byte and never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSetRecord {
    pub units: i64,
    pub resource_type: String,
    pub resource_data: Option<ResourceDataRecord>,
    pub concrete: Option<Vec<u8>>,
}

impl ResourceSetRecord {
    pub fn new(units: i64, resource_type: impl Into<String>) -> Self {
        Self {
            units,
            resource_type: resource_type.into(),
            resource_data: None,
            concrete: None,
        }
    }
}

impl Record for ResourceSetRecord {
    const RECORD: &'static str = "ResourceSet";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            units: fields.required_int("units")?,
            resource_type: fields.required_str("type")?,
            resource_data: fields.optional_record("resource_data")?,
            concrete: fields.optional_bytes("concrete")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("units", self.units)
            .put("type", self.resource_type.as_str())
            .put_opt_record("resource_data", self.resource_data.as_ref())
            .put_opt("concrete", self.concrete.clone())
            .finish()
    }
}
