use super::RqliteAdapter;
use crate::client::Transport;
use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::results::{CustomDbRow, NormalizedResult};
use crate::types::Endpoint;

impl<T: Transport> RqliteAdapter<T> {
    /// Send a statement to the query endpoint and keep its result.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError` if the adapter is disconnected or the request,
    /// decode, or shaping fails. The previous result is cleared either way.
    pub async fn query(
        &mut self,
        statement: impl Into<QueryAndParams>,
    ) -> Result<&mut Self, RqliteDbError> {
        self.run(Endpoint::Query, statement.into()).await
    }

    /// Remove and return the last row of the last result.
    ///
    /// Rows come back in reverse order; repeated calls drain the result and
    /// then return `None`. Use `fetch_all` for a non-destructive read.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ResultUnset` if no result is held.
    pub fn fetch(&mut self) -> Result<Option<CustomDbRow>, RqliteDbError> {
        let result = self.last_result.as_mut().ok_or(RqliteDbError::ResultUnset)?;
        Ok(result.pop())
    }

    /// The last result as shaped: a single mapping or a sequence.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ResultUnset` if no result is held.
    pub fn fetch_all(&self) -> Result<&NormalizedResult, RqliteDbError> {
        self.last_result.as_ref().ok_or(RqliteDbError::ResultUnset)
    }

    /// Number of rows currently held by the last result.
    #[must_use]
    pub fn get_number_of_rows(&self) -> usize {
        self.last_result.as_ref().map_or(0, NormalizedResult::len)
    }
}
