//! Value types for SQL parameters

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Render format for point-in-time values, `'YYYY-MM-DD HH:MM:SS'`.
pub const SQL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A SQL value that can be bound to a statement parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Point-in-time value, rendered with [`SQL_DATE_FORMAT`]
    DateTime(NaiveDateTime),
}

impl Value {
    /// Get the SQL type name for this value, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "DOUBLE PRECISION",
            Value::String(_) => "TEXT",
            Value::DateTime(_) => "TIMESTAMP",
        }
    }

    /// Format a point-in-time value as the fixed literal format.
    ///
    /// Returns `None` for every other value kind.
    pub fn format_datetime(&self) -> Option<String> {
        match self {
            Value::DateTime(dt) => Some(dt.format(SQL_DATE_FORMAT).to_string()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Int(i64::from(val))
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Int(val)
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::Float(f64::from(val))
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(val: NaiveDateTime) -> Self {
        Value::DateTime(val)
    }
}
