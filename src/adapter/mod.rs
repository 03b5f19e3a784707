//! The rqlite adapter: connection options, advisory transaction flag, the
//! pending prepared statement, and the last shaped result.
//!
//! The impl is split by concern:
//! - `select`: `query`, `fetch`, `fetch_all`
//! - `dml`: direct `execute_sql`
//! - `prepared`: `prepare`, binding, `execute`
//! - `tx`: advisory transaction flag
//! - `introspect`: last id, affected rows, version, tables

mod dml;
mod introspect;
mod prepared;
mod select;
mod tx;

use crate::binder::{Statement, SubstitutionMode};
use crate::client::{self, HttpTransport, ResponseMeta, Transport};
use crate::config::ConnectionOptions;
use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::results::{Cardinality, NormalizedResult, shape_with};
use crate::types::Endpoint;

/// Adapter over one rqlite node.
///
/// Every call that reaches the engine awaits exactly one HTTP round trip and
/// takes `&mut self`, so an adapter never has two requests in flight. Share
/// one across tasks only behind external synchronization.
///
/// ```rust,no_run
/// use rqlite_middleware::prelude::*;
///
/// # async fn demo() -> Result<(), RqliteDbError> {
/// let mut db = RqliteAdapter::new(ConnectionOptions::default())?;
/// let users = db
///     .query(("SELECT id, name FROM users WHERE id = ?", vec![RowValues::Int(1)]))
///     .await?
///     .fetch_all()?;
/// # let _ = users;
/// # Ok(())
/// # }
/// ```
pub struct RqliteAdapter<T: Transport = HttpTransport> {
    options: ConnectionOptions,
    transport: T,
    connected: bool,
    in_transaction: bool,
    statement: Option<Statement>,
    last_result: Option<NormalizedResult>,
    last_response: Option<ResponseMeta>,
    cardinality: Cardinality,
    substitution: SubstitutionMode,
}

impl RqliteAdapter<HttpTransport> {
    /// Create a connected adapter that talks HTTP to `options.url()`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::HttpError` if the HTTP client cannot be built.
    pub fn new(options: ConnectionOptions) -> Result<Self, RqliteDbError> {
        let transport = HttpTransport::new(&options)?;
        Ok(Self::with_transport(options, transport))
    }
}

impl<T: Transport> RqliteAdapter<T> {
    /// Create a connected adapter over an explicit transport.
    pub fn with_transport(options: ConnectionOptions, transport: T) -> Self {
        Self {
            options,
            transport,
            connected: true,
            in_transaction: false,
            statement: None,
            last_result: None,
            last_response: None,
            cardinality: Cardinality::default(),
            substitution: SubstitutionMode::default(),
        }
    }

    /// Mark the adapter connected, applying the current options to the transport.
    ///
    /// Calling it again on a connected adapter is harmless.
    ///
    /// # Errors
    ///
    /// Propagates the transport's `reconfigure` error.
    pub fn connect(&mut self) -> Result<&mut Self, RqliteDbError> {
        self.transport.reconfigure(&self.options)?;
        self.connected = true;
        Ok(self)
    }

    /// Replace the options and reconnect with them.
    ///
    /// # Errors
    ///
    /// Propagates the transport's `reconfigure` error.
    pub fn connect_with(&mut self, options: ConnectionOptions) -> Result<&mut Self, RqliteDbError> {
        self.options = options;
        self.connect()
    }

    /// Mark the adapter disconnected. Each request opens its own HTTP
    /// exchange, so there is no socket to close.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Whether options are set. Always true: every `ConnectionOptions` carries
    /// a validated URL, falling back to `DEFAULT_URL`.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.url().is_empty()
    }

    /// Store new options. They reach the transport on the next `connect`.
    pub fn set_options(&mut self, options: ConnectionOptions) -> &mut Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn db_file_exists(&self) -> bool {
        self.options.db_file_exists()
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Cardinality used to shape results of `query`, `execute_sql`, and `execute`.
    #[must_use]
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn set_cardinality(&mut self, cardinality: Cardinality) -> &mut Self {
        self.cardinality = cardinality;
        self
    }

    /// How prepared statements deliver their bound values.
    #[must_use]
    pub fn with_substitution(mut self, substitution: SubstitutionMode) -> Self {
        self.substitution = substitution;
        self
    }

    pub fn set_substitution(&mut self, substitution: SubstitutionMode) -> &mut Self {
        self.substitution = substitution;
        self
    }

    /// Whether the last call left a result behind.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.last_result.is_some()
    }

    /// Metadata reported with the last stored result.
    #[must_use]
    pub fn last_response(&self) -> Option<&ResponseMeta> {
        self.last_response.as_ref()
    }

    fn ensure_connected(&self) -> Result<(), RqliteDbError> {
        if self.connected {
            Ok(())
        } else {
            Err(RqliteDbError::ConnectionError(
                "adapter is not connected".to_string(),
            ))
        }
    }

    async fn dispatch(
        &self,
        endpoint: Endpoint,
        statement: &QueryAndParams,
        cardinality: Cardinality,
    ) -> Result<(NormalizedResult, ResponseMeta), RqliteDbError> {
        self.ensure_connected()?;
        let raw = client::send(&self.transport, endpoint, statement).await?;
        let shaped = shape_with(&raw.columns, &raw.values, cardinality)?;
        Ok((shaped, raw.meta))
    }

    /// Send `statement` and keep its shaped result as the last result.
    async fn run(
        &mut self,
        endpoint: Endpoint,
        statement: QueryAndParams,
    ) -> Result<&mut Self, RqliteDbError> {
        self.last_result = None;
        self.last_response = None;
        let (shaped, meta) = self.dispatch(endpoint, &statement, self.cardinality).await?;
        self.last_result = Some(shaped);
        self.last_response = Some(meta);
        Ok(self)
    }
}
