//! Driver-neutral column values.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{BenchError, Result};

/// A single SQLite value as bound to, or read from, a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }

    fn mismatch(&self, expected: &str) -> BenchError {
        BenchError::Decode(format!("expected {expected} but found {}", self.type_name()))
    }

    /// Reads an INTEGER column.
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Integer(v) => Ok(*v),
            other => Err(other.mismatch("INTEGER")),
        }
    }

    /// Reads a REAL column. Integers are widened, since SQLite stores whole
    /// reals such as `0.0` in a REAL column but may hand them back as INTEGER
    /// when the column has no declared affinity.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(v) => Ok(*v),
            #[allow(clippy::cast_precision_loss)]
            Value::Integer(v) => Ok(*v as f64),
            other => Err(other.mismatch("REAL")),
        }
    }

    /// Reads an INTEGER column as a flag; any non-zero value is `true`.
    pub fn as_bool(&self) -> Result<bool> {
        self.as_i64().map(|v| v != 0)
    }

    /// Borrows a TEXT column.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Text(v) => Ok(v),
            other => Err(other.mismatch("TEXT")),
        }
    }

    /// Copies a TEXT column.
    pub fn to_text(&self) -> Result<String> {
        self.as_str().map(str::to_owned)
    }

    /// Decodes a timestamp stored as unix milliseconds.
    pub fn as_time(&self) -> Result<DateTime<Utc>> {
        let millis = self.as_i64()?;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| BenchError::Decode(format!("timestamp {millis} out of range")))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{v}'"),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Timestamps are bound as unix milliseconds.
impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Integer(v.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_round_trip() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 5).unwrap();
        let v = Value::from(t);
        assert_eq!(v, Value::Integer(1_704_112_205_000));
        assert_eq!(v.as_time().unwrap(), t);
    }

    #[test]
    fn test_type_mismatch() {
        let err = Value::Text("abc".into()).as_i64().unwrap_err();
        assert_eq!(err.to_string(), "decode error: expected INTEGER but found TEXT");
        assert!(Value::Null.as_str().is_err());
    }

    #[test]
    fn test_real_accepts_integer() {
        assert_eq!(Value::Integer(2).as_f64().unwrap(), 2.0);
        assert!(Value::Integer(0).as_bool().is_ok_and(|b| !b));
    }
}
