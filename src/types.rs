use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde_json::Value as JsonValue;

use crate::error::RqliteDbError;

const TIMESTAMP_FORMAT: &str = "%F %T%.f";

/// Values that can be stored in a database row or used as query parameters.
///
/// rqlite speaks JSON, so every variant maps onto a JSON value when sent and
/// every JSON cell maps back onto a variant when received:
/// ```rust
/// use rqlite_middleware::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value, sent as `YYYY-MM-DD HH:MM:SS[.fff]` text
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// Nested JSON value (arrays and objects)
    JSON(JsonValue),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%F %T") {
                return Some(dt);
            }
        }
        None
    }

    /// Integer view that also accepts numeric text, which rqlite hands back
    /// for some pragma and function results.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RowValues::Int(i) => Some(*i),
            RowValues::Bool(b) => Some(i64::from(*b)),
            RowValues::Text(s) => s.trim().parse().ok(),
            #[allow(clippy::cast_possible_truncation)]
            RowValues::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// The value as it would be written literally inside SQL text, before
    /// quoting. `Null` renders as an empty string.
    #[must_use]
    pub fn literal_text(&self) -> String {
        match self {
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => f.to_string(),
            RowValues::Text(s) => s.clone(),
            RowValues::Bool(b) => String::from(if *b { "1" } else { "0" }),
            RowValues::Timestamp(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
            RowValues::Null => String::new(),
            RowValues::JSON(j) => j.to_string(),
        }
    }

    /// Convert into the JSON value placed in a parameterized request body.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ParameterError` for non-finite floats, which JSON cannot carry.
    pub fn to_json(&self) -> Result<JsonValue, RqliteDbError> {
        let value = match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| {
                    RqliteDbError::ParameterError(format!("cannot encode {f} as JSON"))
                })?,
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Bool(b) => JsonValue::Bool(*b),
            RowValues::Timestamp(dt) => {
                JsonValue::String(dt.format(TIMESTAMP_FORMAT).to_string())
            }
            RowValues::Null => JsonValue::Null,
            RowValues::JSON(j) => j.clone(),
        };
        Ok(value)
    }

    /// Map a JSON cell from a response onto a value.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => RowValues::Null,
            JsonValue::Bool(b) => RowValues::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => RowValues::Int(i),
                None => RowValues::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => RowValues::Text(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => RowValues::JSON(value.clone()),
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

/// Which rqlite endpoint a statement is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Endpoint {
    /// Read path, `/db/query`
    Query,
    /// Write path, `/db/execute`
    Execute,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Query => "/db/query",
            Endpoint::Execute => "/db/execute",
        }
    }
}

/// Type hint accepted by `bind_param`/`bind_value`.
///
/// rqlite is untyped over HTTP, so the hint is accepted for contract
/// compatibility and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    Integer,
    Float,
    Text,
    #[default]
    Blob,
    Null,
}
