use super::RqliteAdapter;
use crate::binder::{ParamKey, Statement};
use crate::client::Transport;
use crate::error::RqliteDbError;
use crate::types::{Endpoint, ParamType, RowValues};

impl<T: Transport> RqliteAdapter<T> {
    /// Start a new statement, discarding any earlier one and its bindings.
    pub fn prepare(&mut self, sql: impl Into<String>) -> &mut Self {
        self.statement = Some(Statement::new(sql));
        self
    }

    /// The statement waiting for `execute`, if any.
    #[must_use]
    pub fn prepared(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    /// Bind every `(key, value)` pair to the prepared statement.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ParameterError` if nothing has been prepared.
    pub fn bind_params<I, K, V>(&mut self, params: I) -> Result<&mut Self, RqliteDbError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ParamKey>,
        V: Into<RowValues>,
    {
        self.statement_mut()?.bind_params(params);
        Ok(self)
    }

    /// Bind one parameter. The type hint is ignored; rqlite is untyped over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ParameterError` if nothing has been prepared.
    pub fn bind_param(
        &mut self,
        key: impl Into<ParamKey>,
        value: impl Into<RowValues>,
        _hint: ParamType,
    ) -> Result<&mut Self, RqliteDbError> {
        self.statement_mut()?.bind(key, value);
        Ok(self)
    }

    /// Same as `bind_param`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ParameterError` if nothing has been prepared.
    pub fn bind_value(
        &mut self,
        key: impl Into<ParamKey>,
        value: impl Into<RowValues>,
        hint: ParamType,
    ) -> Result<&mut Self, RqliteDbError> {
        self.bind_param(key, value, hint)
    }

    /// Send the prepared statement to the execute endpoint.
    ///
    /// The statement is consumed: a following `execute` fails until the next
    /// `prepare`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ParameterError` if nothing has been prepared or
    /// binding fails, otherwise any request error.
    pub async fn execute(&mut self) -> Result<&mut Self, RqliteDbError> {
        let statement = self.take_statement()?;
        self.execute_statement_on(Endpoint::Execute, statement).await
    }

    /// Send the prepared statement to the query endpoint, for prepared reads.
    ///
    /// # Errors
    ///
    /// Same as `execute`.
    pub async fn execute_query(&mut self) -> Result<&mut Self, RqliteDbError> {
        let statement = self.take_statement()?;
        self.execute_statement_on(Endpoint::Query, statement).await
    }

    /// Run an owned statement on the execute endpoint without touching the
    /// prepared slot.
    ///
    /// # Errors
    ///
    /// Same as `execute`.
    pub async fn execute_statement(
        &mut self,
        statement: Statement,
    ) -> Result<&mut Self, RqliteDbError> {
        self.execute_statement_on(Endpoint::Execute, statement).await
    }

    async fn execute_statement_on(
        &mut self,
        endpoint: Endpoint,
        statement: Statement,
    ) -> Result<&mut Self, RqliteDbError> {
        let query = statement.into_query(self.substitution)?;
        self.run(endpoint, query).await
    }

    fn statement_mut(&mut self) -> Result<&mut Statement, RqliteDbError> {
        self.statement.as_mut().ok_or_else(no_statement)
    }

    fn take_statement(&mut self) -> Result<Statement, RqliteDbError> {
        self.statement.take().ok_or_else(no_statement)
    }
}

fn no_statement() -> RqliteDbError {
    RqliteDbError::ParameterError("no statement has been prepared".to_string())
}
