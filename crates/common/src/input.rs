//! Normalization of caller input into a canonical byte sequence.
//!
//! A hash operation accepts either raw bytes or text; text is always
//! encoded as UTF-8. No other kind is accepted and there is no implicit
//! numeric-to-bytes coercion. For callers arriving through a dynamic
//! boundary (JSON commands), [`HashInput::from_json`] performs the same
//! normalization and rejects every other value kind by name.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Caller input to a hash operation: a byte sequence or a text string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput<'a> {
    /// Raw bytes, hashed as supplied.
    Bytes(Cow<'a, [u8]>),
    /// Text, encoded as UTF-8 before hashing.
    Text(Cow<'a, str>),
}

impl<'a> HashInput<'a> {
    /// Normalize into the canonical byte sequence.
    ///
    /// Bytes are returned unchanged; text is encoded as UTF-8. Borrowed
    /// input stays borrowed; no copy is made unless one already existed.
    pub fn into_bytes(self) -> Cow<'a, [u8]> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(Cow::Borrowed(text)) => Cow::Borrowed(text.as_bytes()),
            Self::Text(Cow::Owned(text)) => Cow::Owned(text.into_bytes()),
        }
    }

    /// Normalize a dynamically typed JSON value.
    ///
    /// A JSON string is treated as text; a JSON array of integers in
    /// `0..=255` is treated as a byte sequence. Every other kind fails with
    /// [`BridgeError::InvalidInputType`] naming the rejected kind.
    pub fn from_json(value: &Value) -> BridgeResult<HashInput<'static>> {
        match value {
            Value::String(text) => Ok(HashInput::Text(Cow::Owned(text.clone()))),
            Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    let byte = item
                        .as_u64()
                        .filter(|v| *v <= u64::from(u8::MAX))
                        .ok_or_else(|| {
                            BridgeError::invalid_input_type("array of non-byte values")
                        })?;
                    bytes.push(byte as u8);
                }
                Ok(HashInput::Bytes(Cow::Owned(bytes)))
            }
            other => Err(BridgeError::invalid_input_type(json_kind(other))),
        }
    }
}

impl<'a> From<&'a [u8]> for HashInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for HashInput<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a str> for HashInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for HashInput<'static> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for HashInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
