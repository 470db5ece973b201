//! Codec errors.

/// Failure to decode or encode a record or envelope.
///
/// Every error is fatal to the single message being processed; nothing is
/// partially populated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The `name` discriminator is missing or names a different type.
    #[error("expected discriminator `{expected}`, found {}", describe(.found))]
    Decode {
        expected: &'static str,
        found: Option<String>,
    },
    /// No envelope is registered for this discriminator.
    #[error("unknown message type `{0}`")]
    UnknownMessageType(String),
    /// A mandatory field of the envelope is unset.
    #[error("{message_type} is missing mandatory fields")]
    Validation { message_type: &'static str },
    /// A field required by the record is absent from the mapping.
    #[error("{record}: missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    /// A field is present but has the wrong shape.
    #[error("{record}: field `{field}` must be {expected}, found {found}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(name) => format!("`{name}`"),
        None => "nothing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_mentions_both_names() {
        let err = CodecError::Decode {
            expected: "Query",
            found: Some("Claim".into()),
        };
        assert_eq!(err.to_string(), "expected discriminator `Query`, found `Claim`");

        let err = CodecError::Decode {
            expected: "Query",
            found: None,
        };
        assert_eq!(err.to_string(), "expected discriminator `Query`, found nothing");
    }
}
