//! Discriminator lookup for incoming mappings.

use crate::error::CodecError;
use crate::fields::{FieldReader, NAME_KEY};
use crate::message::{FACTORIES, Message};
use crate::value::Mapping;
use std::collections::HashMap;
use std::sync::LazyLock;

type Factory = fn() -> Message;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// Maps each `name` discriminator to a constructor for an empty envelope.
///
/// Built once and never mutated, so it can be shared across consumer tasks
/// freely.
#[derive(Debug)]
pub struct Registry {
    factories: HashMap<&'static str, Factory>,
}

impl Registry {
    /// The registry of every envelope this crate defines.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn builtin() -> Self {
        let factories = FACTORIES
            .iter()
            .map(|(message_type, factory)| (message_type.as_str(), *factory))
            .collect();
        Self { factories }
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.factories.contains_key(discriminator)
    }

    pub fn discriminators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Decodes any known envelope, choosing the type from `name`.
    pub fn decode(&self, mapping: &Mapping) -> Result<Message, CodecError> {
        let name = FieldReader::new("Message", mapping)
            .discriminator()
            .ok_or(CodecError::MissingField {
                record: "Message",
                field: NAME_KEY,
            })?;
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CodecError::UnknownMessageType(name.to_string()))?;
        let mut message = factory();
        message.populate_from_mapping(mapping)?;
        Ok(message)
    }
}

/// Shorthand for [`Registry::global`]`().decode(mapping)`.
pub fn decode(mapping: &Mapping) -> Result<Message, CodecError> {
    Registry::global().decode(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::MessageType;
    use crate::messages::Query;
    use crate::value::Value;

    #[test]
    fn every_type_is_registered() {
        let registry = Registry::global();
        for message_type in MessageType::ALL {
            assert!(registry.contains(message_type.as_str()));
        }
        assert_eq!(registry.discriminators().count(), MessageType::ALL.len());
        assert!(!registry.contains("FailedRpc"));
    }

    #[test]
    fn decodes_by_name() {
        let mut query = Query::new("msg1");
        query.callback_topic = "topic".into();
        let mapping = crate::envelope::Envelope::to_mapping(&query).unwrap();

        let message = decode(&mapping).unwrap();
        assert_eq!(message, Message::from(query));
    }

    #[test]
    fn unknown_and_missing_names() {
        let mut mapping = Mapping::new();
        assert_eq!(
            decode(&mapping),
            Err(CodecError::MissingField {
                record: "Message",
                field: NAME_KEY,
            })
        );
        assert_eq!(
            decode(&mapping).unwrap_err().to_string(),
            "Message: missing required field `name`"
        );

        mapping.insert(NAME_KEY.into(), Value::String("NotARealType".into()));
        assert_eq!(
            decode(&mapping),
            Err(CodecError::UnknownMessageType("NotARealType".into()))
        );
    }
}
