use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::value::Mapping;

/// Outcome of an operation, carried as `status` by every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    /// Zero on success.
    pub code: i32,
    pub message: Option<String>,
    pub exception_code: Option<i64>,
}

impl ResultRecord {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            exception_code: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

impl Record for ResultRecord {
    const RECORD: &'static str = "Result";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            code: fields.required_i32("code")?,
            message: fields.optional_str("message")?,
            exception_code: fields.optional_int("exception_code")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("code", self.code)
            .put_opt("message", self.message.clone())
            .put_opt("exception_code", self.exception_code)
            .finish()
    }
}

/// Result of applying a ticket update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDataRecord {
    pub message: Option<String>,
    pub failed: bool,
}

impl Record for UpdateDataRecord {
    const RECORD: &'static str = "UpdateData";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            message: fields.optional_str("message")?,
            failed: fields.required_bool("failed")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put_opt("message", self.message.clone())
            .put("failed", self.failed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_is_minimal() {
        let mapping = ResultRecord::ok().to_mapping();
        assert_eq!(mapping.len(), 1);
        assert!(ResultRecord::from_mapping(&mapping).unwrap().is_ok());
    }

    #[test]
    fn error_result_roundtrip() {
        let mut result = ResultRecord::error(-1, "no such reservation");
        result.exception_code = Some(404);
        let back = ResultRecord::from_mapping(&result.to_mapping()).unwrap();
        assert_eq!(back, result);
        assert!(!back.is_ok());
    }

    #[test]
    fn failed_flag_is_required() {
        let mapping = MappingWriter::new().put("message", "message").finish();
        assert!(matches!(
            UpdateDataRecord::from_mapping(&mapping),
            Err(CodecError::MissingField { field: "failed", .. })
        ));
    }
}
