use super::RqliteAdapter;
use crate::binder::escape;
use crate::client::Transport;
use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::results::{Cardinality, NormalizedResult};
use crate::types::{Endpoint, RowValues};

pub(crate) const LAST_ID_SQL: &str = "SELECT last_insert_rowid() as last_id";
pub(crate) const AFFECTED_ROWS_SQL: &str = "PRAGMA count_changes;";
pub(crate) const VERSION_SQL: &str = "SELECT sqlite_version() as version;";
pub(crate) const TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
     UNION ALL SELECT name FROM sqlite_temp_master WHERE type IN ('table', 'view') ORDER BY 1";

// These helpers go through the query endpoint but leave the last result alone.
impl<T: Transport> RqliteAdapter<T> {
    /// Quote `value` for embedding in SQL text. See `binder::escape`.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        escape(value)
    }

    /// Row id of the last insert, as reported by `last_insert_rowid()`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::MalformedResponse` if the engine returns no
    /// integer, otherwise any request error.
    pub async fn get_last_id(&self) -> Result<i64, RqliteDbError> {
        let result = self.fetch_fixed(LAST_ID_SQL, Cardinality::One).await?;
        scalar(&result, "last_id")
            .and_then(RowValues::to_i64)
            .ok_or_else(|| missing("last_id"))
    }

    /// Value of `PRAGMA count_changes`; zero when the pragma returns no row.
    ///
    /// # Errors
    ///
    /// Returns any request error, or `RqliteDbError::MalformedResponse` for a
    /// non-integer value.
    pub async fn get_number_of_affected_rows(&self) -> Result<i64, RqliteDbError> {
        let result = self.fetch_fixed(AFFECTED_ROWS_SQL, Cardinality::One).await?;
        match scalar(&result, "count_changes") {
            None => Ok(0),
            Some(value) => value.to_i64().ok_or_else(|| missing("count_changes")),
        }
    }

    /// SQLite version of the engine.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::MalformedResponse` if no version comes back,
    /// otherwise any request error.
    pub async fn get_version(&self) -> Result<String, RqliteDbError> {
        let result = self.fetch_fixed(VERSION_SQL, Cardinality::One).await?;
        scalar(&result, "version")
            .map(RowValues::literal_text)
            .ok_or_else(|| missing("version"))
    }

    /// Names of tables and views, temporary ones included, sorted.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_tables(&self) -> Result<Vec<String>, RqliteDbError> {
        let result = self.fetch_fixed(TABLES_SQL, Cardinality::Many).await?;
        Ok(result
            .rows()
            .iter()
            .filter_map(|row| row.get("name").and_then(RowValues::as_text))
            .map(str::to_string)
            .collect())
    }

    async fn fetch_fixed(
        &self,
        sql: &str,
        cardinality: Cardinality,
    ) -> Result<NormalizedResult, RqliteDbError> {
        let statement = QueryAndParams::new_without_params(sql);
        let (result, _) = self.dispatch(Endpoint::Query, &statement, cardinality).await?;
        Ok(result)
    }
}

/// Named column of the first row, falling back to its first column.
fn scalar<'a>(result: &'a NormalizedResult, column: &str) -> Option<&'a RowValues> {
    let row = result.first()?;
    row.get(column).or_else(|| row.get_by_index(0))
}

fn missing(column: &str) -> RqliteDbError {
    RqliteDbError::MalformedResponse(format!("no usable `{column}` value in response"))
}
