//! Typed access to mapping fields.
//!
//! [`FieldReader`] and [`MappingWriter`] carry the presence rules shared by
//! every record: a missing key and an explicit `Null` both mean "unset" on
//! decode, and unset optional fields are never written on encode.

use crate::error::CodecError;
use crate::value::{Mapping, Properties, Value};

/// Key holding the type discriminator.
pub const NAME_KEY: &str = "name";

/// Literal some upstream encoders wrote in place of an absent value.
const NULL_SENTINEL: &str = "null";

/// A structured value embedded in an envelope.
pub trait Record: Sized {
    /// Record name used in error messages.
    const RECORD: &'static str;

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError>;

    fn to_mapping(&self) -> Mapping;
}

/// Read-only view over a mapping being decoded into `record`.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    record: &'static str,
    mapping: &'a Mapping,
}

impl<'a> FieldReader<'a> {
    pub fn new(record: &'static str, mapping: &'a Mapping) -> Self {
        Self { record, mapping }
    }

    /// The raw `name` value, if it is a string.
    pub fn discriminator(&self) -> Option<&'a str> {
        self.mapping.get(NAME_KEY).and_then(Value::as_str)
    }

    /// Fails unless `name` is exactly `expected`.
    pub fn expect_discriminator(&self, expected: &'static str) -> Result<(), CodecError> {
        match self.discriminator() {
            Some(found) if found == expected => Ok(()),
            found => Err(CodecError::Decode {
                expected,
                found: found.map(str::to_string),
            }),
        }
    }

    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.mapping.get(field).filter(|v| !v.is_null())
    }

    fn missing(&self, field: &'static str) -> CodecError {
        CodecError::MissingField {
            record: self.record,
            field,
        }
    }

    fn invalid(&self, field: &'static str, expected: &'static str, found: &Value) -> CodecError {
        CodecError::InvalidField {
            record: self.record,
            field,
            expected,
            found: found.kind(),
        }
    }

    fn require<T>(
        &self,
        field: &'static str,
        read: impl FnOnce(&'a Value) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        let value = self.present(field).ok_or_else(|| self.missing(field))?;
        read(value)
    }

    fn optional<T>(
        &self,
        field: &'static str,
        read: impl FnOnce(&'a Value) -> Result<T, CodecError>,
    ) -> Result<Option<T>, CodecError> {
        self.present(field).map(read).transpose()
    }

    fn str_value(&self, field: &'static str, value: &Value) -> Result<String, CodecError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(field, "a string", value))
    }

    fn int_value(&self, field: &'static str, value: &Value) -> Result<i64, CodecError> {
        value.as_int().ok_or_else(|| self.invalid(field, "an int", value))
    }

    fn i32_value(&self, field: &'static str, value: &Value) -> Result<i32, CodecError> {
        let wide = self.int_value(field, value)?;
        i32::try_from(wide).map_err(|_| self.invalid(field, "a 32-bit int", value))
    }

    fn map_value(&self, field: &'static str, value: &'a Value) -> Result<&'a Mapping, CodecError> {
        value.as_map().ok_or_else(|| self.invalid(field, "a map", value))
    }

    fn list_value(&self, field: &'static str, value: &'a Value) -> Result<&'a [Value], CodecError> {
        value.as_list().ok_or_else(|| self.invalid(field, "a list", value))
    }

    pub fn required_str(&self, field: &'static str) -> Result<String, CodecError> {
        self.require(field, |v| self.str_value(field, v))
    }

    /// A required string that must also be non-empty.
    pub fn required_non_empty_str(&self, field: &'static str) -> Result<String, CodecError> {
        let value = self.required_str(field)?;
        if value.is_empty() {
            return Err(CodecError::InvalidField {
                record: self.record,
                field,
                expected: "a non-empty string",
                found: "empty string",
            });
        }
        Ok(value)
    }

    pub fn optional_str(&self, field: &'static str) -> Result<Option<String>, CodecError> {
        self.optional(field, |v| self.str_value(field, v))
    }

    /// Like [`optional_str`](Self::optional_str), but the literal `"null"`
    /// also reads as unset.
    pub fn optional_str_or_null_sentinel(
        &self,
        field: &'static str,
    ) -> Result<Option<String>, CodecError> {
        Ok(self
            .optional_str(field)?
            .filter(|s| s != NULL_SENTINEL))
    }

    pub fn required_int(&self, field: &'static str) -> Result<i64, CodecError> {
        self.require(field, |v| self.int_value(field, v))
    }

    pub fn optional_int(&self, field: &'static str) -> Result<Option<i64>, CodecError> {
        self.optional(field, |v| self.int_value(field, v))
    }

    pub fn required_i32(&self, field: &'static str) -> Result<i32, CodecError> {
        self.require(field, |v| self.i32_value(field, v))
    }

    pub fn optional_i32(&self, field: &'static str) -> Result<Option<i32>, CodecError> {
        self.optional(field, |v| self.i32_value(field, v))
    }

    pub fn required_bool(&self, field: &'static str) -> Result<bool, CodecError> {
        self.require(field, |v| {
            v.as_bool().ok_or_else(|| self.invalid(field, "a bool", v))
        })
    }

    pub fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, CodecError> {
        self.optional(field, |v| {
            v.as_bool().ok_or_else(|| self.invalid(field, "a bool", v))
        })
    }

    /// Binary payloads are copied through untouched.
    pub fn optional_bytes(&self, field: &'static str) -> Result<Option<Vec<u8>>, CodecError> {
        self.optional(field, |v| {
            v.as_bytes()
                .map(<[u8]>::to_vec)
                .ok_or_else(|| self.invalid(field, "bytes", v))
        })
    }

    pub fn optional_properties(
        &self,
        field: &'static str,
    ) -> Result<Option<Properties>, CodecError> {
        self.optional(field, |v| {
            let map = self.map_value(field, v)?;
            map.iter()
                .map(|(key, value)| Ok((key.clone(), self.str_value(field, value)?)))
                .collect()
        })
    }

    /// Properties that are always emitted; absence reads as empty.
    pub fn properties(&self, field: &'static str) -> Result<Properties, CodecError> {
        Ok(self.optional_properties(field)?.unwrap_or_default())
    }

    pub fn optional_str_list(&self, field: &'static str) -> Result<Option<Vec<String>>, CodecError> {
        self.optional(field, |v| {
            self.list_value(field, v)?
                .iter()
                .map(|item| self.str_value(field, item))
                .collect()
        })
    }

    pub fn required_record<T: Record>(&self, field: &'static str) -> Result<T, CodecError> {
        self.require(field, |v| T::from_mapping(self.map_value(field, v)?))
    }

    pub fn optional_record<T: Record>(&self, field: &'static str) -> Result<Option<T>, CodecError> {
        self.optional(field, |v| T::from_mapping(self.map_value(field, v)?))
    }

    /// Like [`optional_record`](Self::optional_record), but the literal
    /// `"null"` also reads as unset.
    pub fn optional_record_or_null_sentinel<T: Record>(
        &self,
        field: &'static str,
    ) -> Result<Option<T>, CodecError> {
        match self.present(field) {
            Some(Value::String(s)) if s == NULL_SENTINEL => Ok(None),
            _ => self.optional_record(field),
        }
    }

    pub fn optional_record_list<T: Record>(
        &self,
        field: &'static str,
    ) -> Result<Option<Vec<T>>, CodecError> {
        self.optional(field, |v| {
            self.list_value(field, v)?
                .iter()
                .map(|item| T::from_mapping(self.map_value(field, item)?))
                .collect()
        })
    }

    /// A list that is omitted when empty; absence reads as empty.
    pub fn record_list<T: Record>(&self, field: &'static str) -> Result<Vec<T>, CodecError> {
        Ok(self.optional_record_list(field)?.unwrap_or_default())
    }
}

/// Builds a mapping, dropping unset optional fields.
#[derive(Debug, Default)]
pub struct MappingWriter {
    mapping: Mapping,
}

impl MappingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a mapping carrying the `name` discriminator.
    pub fn tagged(name: &str) -> Self {
        Self::new().put(NAME_KEY, name)
    }

    pub fn put(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.mapping.insert(key.to_string(), value.into());
        self
    }

    pub fn put_opt<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.put(key, value),
            None => self,
        }
    }

    pub fn put_record<R: Record>(self, key: &str, record: &R) -> Self {
        self.put(key, record.to_mapping())
    }

    pub fn put_opt_record<R: Record>(self, key: &str, record: Option<&R>) -> Self {
        self.put_opt(key, record.map(Record::to_mapping))
    }

    /// Writes a list of mappings when `mappings` is `Some`, even if empty.
    pub fn put_opt_list(self, key: &str, mappings: Option<Vec<Mapping>>) -> Self {
        self.put_opt(
            key,
            mappings.map(|list| Value::List(list.into_iter().map(Value::Map).collect())),
        )
    }

    pub fn put_opt_records<R: Record>(self, key: &str, records: Option<&[R]>) -> Self {
        self.put_opt_list(
            key,
            records.map(|list| list.iter().map(Record::to_mapping).collect()),
        )
    }

    /// Merges `other` over the current fields; later keys win.
    pub fn extend(mut self, other: Mapping) -> Self {
        self.mapping.extend(other);
        self
    }

    pub fn finish(self) -> Mapping {
        self.mapping
    }
}
