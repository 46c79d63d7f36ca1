//! Typed values and raw-string coercion.
//!
//! Every option value and positional token arrives as a raw string. The
//! functions here turn it into a [`Value`] of the declared [`ValueType`], or
//! report a [`CoercionError`] that embeds the offending input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ValueType;

/// A coerced option or positional value.
///
/// Serializes untagged, so a list of integers renders as `[1, 2]` rather
/// than a list of tagged objects.
///
/// # Examples
///
/// ```
/// use argscan_core::Value;
///
/// let v = Value::Integer(5);
/// assert_eq!(v.as_integer(), Some(5));
/// assert_eq!(v.as_str(), None);
/// assert_eq!(serde_json::to_string(&v).unwrap(), "5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The [`ValueType`] this value was coerced to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Integer(_) => ValueType::Integer,
            Self::String(_) => ValueType::String,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A raw string the declared type rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {expected} value `{raw}`: {reason}")]
pub struct CoercionError {
    /// The rejected input, verbatim.
    pub raw: String,
    /// The type it was coerced to.
    pub expected: ValueType,
    /// Why it was rejected.
    pub reason: String,
}

impl CoercionError {
    fn new(raw: &str, expected: ValueType, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            expected,
            reason: reason.into(),
        }
    }
}

/// Coerces `raw` into a value of `value_type`.
///
/// Integers are base-10 signed 64-bit. Booleans accept `true`, `false`, `1`
/// and `0`, ignoring ASCII case. Strings are taken verbatim.
///
/// # Errors
///
/// Returns a [`CoercionError`] embedding `raw` when the input does not parse.
///
/// # Examples
///
/// ```
/// use argscan_core::{coerce, Value, ValueType};
///
/// assert_eq!(coerce(ValueType::Integer, "-42").unwrap(), Value::Integer(-42));
/// assert_eq!(coerce(ValueType::Bool, "TRUE").unwrap(), Value::Bool(true));
///
/// let err = coerce(ValueType::Integer, "notint1").unwrap_err();
/// assert!(err.to_string().contains("notint1"));
/// ```
pub fn coerce(value_type: ValueType, raw: &str) -> Result<Value, CoercionError> {
    match value_type {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|err| CoercionError::new(raw, value_type, err.to_string())),
        ValueType::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| CoercionError::new(raw, value_type, "expected true, false, 1 or 0")),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}
