use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value as JsonValue;

use super::Transport;
use super::request::endpoint_url;
use crate::config::ConnectionOptions;
use crate::error::RqliteDbError;
use crate::types::Endpoint;

/// `reqwest`-backed transport that posts statements to an rqlite node.
///
/// The client is pinned to HTTP/1.1, which the rqlite HTTP server requires.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for the node named in `options`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::HttpError` if the HTTP client cannot be constructed.
    pub fn new(options: &ConnectionOptions) -> Result<Self, RqliteDbError> {
        let client = reqwest::Client::builder().http1_only().build()?;
        Ok(Self {
            base_url: options.url().to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, body: String) -> Result<JsonValue, RqliteDbError> {
        let url = endpoint_url(&self.base_url, endpoint);
        tracing::trace!(%url, %body, "POST");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(RqliteDbError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| RqliteDbError::MalformedResponse(format!("{e}: {text}")))
    }

    fn reconfigure(&mut self, options: &ConnectionOptions) -> Result<(), RqliteDbError> {
        options.url().clone_into(&mut self.base_url);
        Ok(())
    }
}
