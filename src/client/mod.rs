//! HTTP query/execute client for rqlite.
//!
//! - `request`: request body and URL construction
//! - `response`: decoding of the `results` envelope
//! - `http`: the `reqwest` transport
//!
//! The `Transport` trait is the seam between request construction and the
//! wire, so the adapter can run against a scripted double in tests.

pub mod http;
pub mod request;
pub mod response;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::config::ConnectionOptions;
use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::types::Endpoint;

pub use http::HttpTransport;
pub use request::{QUERY_STRING, build_request_body, endpoint_url};
pub use response::{RawResponse, ResponseMeta};

/// Carries a serialized request body to an rqlite endpoint and returns the
/// decoded JSON reply.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `body` to `endpoint`.
    ///
    /// # Errors
    ///
    /// Implementations return `RqliteDbError` for transport failures, non-2xx
    /// statuses, and bodies that are not JSON.
    async fn send(&self, endpoint: Endpoint, body: String) -> Result<JsonValue, RqliteDbError>;

    /// Apply new connection options. Transports without address state keep
    /// the default no-op.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ConfigError` if the options cannot be applied.
    fn reconfigure(&mut self, _options: &ConnectionOptions) -> Result<(), RqliteDbError> {
        Ok(())
    }
}

/// Send one statement and decode `results[0]` of the reply.
///
/// # Errors
///
/// Propagates body construction, transport, and decode errors.
pub async fn send<T: Transport + ?Sized>(
    transport: &T,
    endpoint: Endpoint,
    statement: &QueryAndParams,
) -> Result<RawResponse, RqliteDbError> {
    let body = build_request_body(&statement.query, &statement.params)?;
    tracing::debug!(
        ?endpoint,
        sql = %statement.query,
        params = statement.params.len(),
        "sending statement"
    );
    let reply = transport.send(endpoint, body).await?;
    RawResponse::from_body(reply)
}
