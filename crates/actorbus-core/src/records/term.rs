use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, Record};
use crate::value::Mapping;

/// Validity window of a reservation, in milliseconds since the epoch.
///
/// Ordering of `start_time` and `end_time` is the caller's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermRecord {
    pub start_time: i64,
    pub end_time: i64,
    /// Start of the extended window when a term is renewed.
    pub new_start_time: Option<i64>,
}

impl TermRecord {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
            new_start_time: None,
        }
    }

    /// Length of the window; zero when the window is inverted.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.end_time.saturating_sub(self.start_time)).unwrap_or(0)
    }
}

impl Record for TermRecord {
    const RECORD: &'static str = "Term";

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            start_time: fields.required_int("start_time")?,
            end_time: fields.required_int("end_time")?,
            new_start_time: fields.optional_int("new_start_time")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .put("start_time", self.start_time)
            .put("end_time", self.end_time)
            .put_opt("new_start_time", self.new_start_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration() {
        assert_eq!(TermRecord::new(1_000, 61_000).duration_ms(), 60_000);
        assert_eq!(TermRecord::new(5, 1).duration_ms(), 0);
    }

    #[test]
    fn new_start_time_is_optional() {
        let term = TermRecord::new(1593854111999, 1593854111999);
        let mapping = term.to_mapping();
        assert!(!mapping.contains_key("new_start_time"));
        assert_eq!(TermRecord::from_mapping(&mapping).unwrap(), term);
    }
}
