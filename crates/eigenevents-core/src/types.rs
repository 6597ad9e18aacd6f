//! Decoded parameter values.
//!
//! Every ABI value coming out of the decoder is normalized into a
//! [`DecodedValue`]: numbers become decimal strings, addresses become
//! EIP-55 checksummed strings, byte strings become `0x`-hex, and tuples
//! become ordered maps keyed by component name.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Decoded parameters of one event, keyed by parameter name in ABI order.
pub type ReturnValues = IndexMap<String, DecodedValue>;

/// A decoded, normalized parameter value.
///
/// Serializes untagged, so JSON output is made of plain strings, booleans,
/// arrays and objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Bool(bool),
    /// Signed or unsigned integer of any width, as a decimal string
    Number(String),
    /// 20-byte address, EIP-55 checksummed
    Address(String),
    /// Fixed or dynamic byte string, `0x`-prefixed lowercase hex
    Bytes(String),
    Str(String),
    Array(Vec<DecodedValue>),
    /// Named tuple components; anonymous components never appear
    Struct(IndexMap<String, DecodedValue>),
}

impl DecodedValue {
    /// Look up a named component if this value is a struct.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Struct(fields) => fields.get(name),
            _ => None,
        }
    }

    /// The inner string for scalar string-like values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Number(s)
            | DecodedValue::Address(s)
            | DecodedValue::Bytes(s)
            | DecodedValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the inner string if this is an Address value.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            DecodedValue::Address(a) => Some(a.as_str()),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&IndexMap<String, DecodedValue>> {
        match self {
            DecodedValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Bool(b) => write!(f, "{b}"),
            DecodedValue::Number(s)
            | DecodedValue::Address(s)
            | DecodedValue::Bytes(s)
            | DecodedValue::Str(s) => write!(f, "{s}"),
            DecodedValue::Array(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Struct(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<bool> for DecodedValue {
    fn from(b: bool) -> Self {
        DecodedValue::Bool(b)
    }
}

impl From<&[u8]> for DecodedValue {
    fn from(bytes: &[u8]) -> Self {
        DecodedValue::Bytes(format!("0x{}", hex::encode(bytes)))
    }
}
