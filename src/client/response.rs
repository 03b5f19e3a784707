use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::RqliteDbError;

/// Metadata rqlite reports next to a statement result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub last_insert_id: Option<i64>,
    #[serde(default)]
    pub rows_affected: Option<i64>,
    /// Server-side execution time in seconds, present with `timings`
    #[serde(default)]
    pub time: Option<f64>,
}

/// The first statement result of a response.
///
/// `columns` and `values` are empty when the engine omitted them, which it
/// does for writes and for reads that matched no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    pub columns: Vec<String>,
    pub values: Vec<JsonValue>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    results: Option<Vec<StatementResult>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    values: Vec<JsonValue>,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    meta: ResponseMeta,
}

impl RawResponse {
    /// Decode a response body, keeping only `results[0]`.
    ///
    /// # Errors
    ///
    /// * `RqliteDbError::MalformedResponse` if `results` is missing, empty, or mistyped.
    /// * `RqliteDbError::RemoteSqlError` if the engine reported an error for the statement.
    pub fn from_body(body: JsonValue) -> Result<Self, RqliteDbError> {
        let envelope: Envelope = serde_json::from_value(body)
            .map_err(|e| RqliteDbError::MalformedResponse(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(RqliteDbError::RemoteSqlError(error));
        }

        let first = envelope
            .results
            .ok_or_else(|| RqliteDbError::MalformedResponse("missing `results`".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| RqliteDbError::MalformedResponse("empty `results`".to_string()))?;

        if let Some(error) = first.error {
            tracing::warn!(%error, "statement rejected by rqlite");
            return Err(RqliteDbError::RemoteSqlError(error));
        }

        Ok(Self {
            columns: first.columns,
            values: first.values,
            meta: first.meta,
        })
    }
}
