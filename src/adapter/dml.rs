use super::RqliteAdapter;
use crate::client::Transport;
use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::types::Endpoint;

impl<T: Transport> RqliteAdapter<T> {
    /// Send a statement straight to the execute endpoint and keep its result.
    ///
    /// `last_response()` carries `last_insert_id` and `rows_affected` when the
    /// engine reports them.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError` if the adapter is disconnected or the request,
    /// decode, or shaping fails.
    pub async fn execute_sql(
        &mut self,
        statement: impl Into<QueryAndParams>,
    ) -> Result<&mut Self, RqliteDbError> {
        self.run(Endpoint::Execute, statement.into()).await
    }
}
