//! Actor credentials.
//!
//! An actor is identified on the bus by a display name plus an opaque guid.
//! Neither half is interpreted here; authorization happens elsewhere.

use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::value::Mapping;
use std::fmt;

/// Credential pair attached to requests for authorization context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuthRecord {
    pub name: String,
    pub guid: String,
}

impl AuthRecord {
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: guid.into(),
        }
    }

    /// The actor's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The actor's guid.
    pub fn guid(&self) -> &str {
        &self.guid
    }
}

impl fmt::Display for AuthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.guid)
    }
}

impl Record for AuthRecord {
    const RECORD: &'static str = "Auth";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            name: fields.required_str("name")?,
            guid: fields.required_str("guid")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("name", self.name.as_str())
            .put("guid", self.guid.as_str())
            .finish()
    }
}
