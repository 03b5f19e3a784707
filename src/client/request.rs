use crate::error::RqliteDbError;
use crate::types::{Endpoint, RowValues};

/// Diagnostic flags appended to every endpoint URL.
pub const QUERY_STRING: &str = "pretty&timings";

/// Full URL for `endpoint` on the node at `base_url`.
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{base_url}{}?{QUERY_STRING}", endpoint.path())
}

/// Serialize one statement into the request body.
///
/// Without parameters the body is `["<sql>"]`; with parameters it is
/// `[["<sql>", [<params>]]]`. Only one statement travels per request.
///
/// # Errors
///
/// Returns `RqliteDbError::ParameterError` if a parameter has no JSON form, or
/// `RqliteDbError::JsonError` if serialization fails.
pub fn build_request_body(sql: &str, params: &[RowValues]) -> Result<String, RqliteDbError> {
    let sql_json = serde_json::to_string(sql)?;
    if params.is_empty() {
        return Ok(format!("[{sql_json}]"));
    }

    let params = params
        .iter()
        .map(RowValues::to_json)
        .collect::<Result<Vec<_>, _>>()?;
    let params_json = serde_json::to_string(&params)?;
    Ok(format!("[[{sql_json}, {params_json}]]"))
}
