use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// This is the "plain SQL or `[sql, params]`" input accepted by
/// `RqliteAdapter::query` and `RqliteAdapter::execute_sql`. A bare string
/// converts into a statement without parameters, a `(sql, params)` tuple
/// into the parameterized form:
/// ```rust
/// use rqlite_middleware::prelude::*;
///
/// let plain: QueryAndParams = "SELECT 1".into();
/// let bound: QueryAndParams =
///     ("SELECT id, name FROM users WHERE id = ?", vec![RowValues::Int(1)]).into();
/// assert!(plain.params.is_empty());
/// assert_eq!(bound.params.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters sent alongside the query
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters
    ///
    /// # Arguments
    ///
    /// * `query` - The SQL query string
    /// * `params` - The parameters to send with the query
    ///
    /// # Returns
    ///
    /// A new `QueryAndParams` instance
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl From<&str> for QueryAndParams {
    fn from(query: &str) -> Self {
        Self::new_without_params(query)
    }
}

impl From<String> for QueryAndParams {
    fn from(query: String) -> Self {
        Self::new_without_params(query)
    }
}

impl<S: Into<String>> From<(S, Vec<RowValues>)> for QueryAndParams {
    fn from((query, params): (S, Vec<RowValues>)) -> Self {
        Self::new(query, params)
    }
}
