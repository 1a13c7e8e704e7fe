//! Structured record fields
//!
//! This module provides:
//! - `FieldValue`: a typed value, also the element type of key/value argument lists
//! - `Field`: a named, typed value attached to a record
//! - helper constructors (`string`, `int`, `duration`, ...) for the structured call style

use std::fmt;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Error(String),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for record encoding
    ///
    /// Durations are rendered as fractional seconds.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => float_to_json(*f),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => float_to_json(d.as_secs_f64()),
            FieldValue::Error(e) => serde_json::Value::String(e.clone()),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    /// The key text if this value can serve as a key in a key/value list.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// NaN and infinities have no JSON number form; keep them readable as strings.
fn float_to_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(f.to_string()))
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i64::from(i))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(u: $t) -> Self {
                FieldValue::Uint(u64::from(u))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for FieldValue {
    fn from(i: isize) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// A named, typed value attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

pub fn string(key: impl Into<String>, value: impl Into<String>) -> Field {
    Field::new(key, FieldValue::String(value.into()))
}

pub fn int(key: impl Into<String>, value: i64) -> Field {
    Field::new(key, FieldValue::Int(value))
}

pub fn uint(key: impl Into<String>, value: u64) -> Field {
    Field::new(key, FieldValue::Uint(value))
}

pub fn float(key: impl Into<String>, value: f64) -> Field {
    Field::new(key, FieldValue::Float(value))
}

pub fn bool(key: impl Into<String>, value: bool) -> Field {
    Field::new(key, FieldValue::Bool(value))
}

pub fn duration(key: impl Into<String>, value: Duration) -> Field {
    Field::new(key, FieldValue::Duration(value))
}

/// Record an error under the conventional `error` key.
pub fn error(err: &dyn std::error::Error) -> Field {
    Field::new("error", FieldValue::Error(err.to_string()))
}

pub fn named_error(key: impl Into<String>, err: &dyn std::error::Error) -> Field {
    Field::new(key, FieldValue::Error(err.to_string()))
}

/// Capture any `Display` value as a string field.
pub fn display(key: impl Into<String>, value: impl fmt::Display) -> Field {
    Field::new(key, FieldValue::String(value.to_string()))
}

pub fn null(key: impl Into<String>) -> Field {
    Field::new(key, FieldValue::Null)
}
