//! Statement binding.
//!
//! Two ways of getting bound values to rqlite:
//! - `SubstitutionMode::Literal` searches the SQL text for each bound value and
//!   replaces it with its quoted form. The value must already appear in the
//!   SQL, and quoting does not escape embedded quotes.
//! - `SubstitutionMode::Placeholders` leaves the SQL alone and sends the values
//!   in the parameterized request body, matched against `?` placeholders.

mod params;
mod placeholders;
mod quote;

pub use params::{BoundParams, ParamKey};
pub use placeholders::{PlaceholderScan, scan_placeholders};
pub use quote::{escape, substitute};

use crate::error::RqliteDbError;
use crate::query::QueryAndParams;
use crate::types::RowValues;

/// How bound values reach the engine at execute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Textual value substitution into the SQL
    #[default]
    Literal,
    /// Values sent alongside `?` placeholders
    Placeholders,
}

/// SQL text plus its bound parameters.
///
/// ```rust
/// use rqlite_middleware::prelude::*;
///
/// let mut stmt = Statement::new("SELECT * FROM users WHERE name = alice");
/// stmt.bind("name", "alice");
/// assert_eq!(stmt.render_literal(), "SELECT * FROM users WHERE name = 'alice'");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    text: String,
    params: BoundParams,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BoundParams::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn params(&self) -> &BoundParams {
        &self.params
    }

    /// Bind `value` under `key`; rebinding a key replaces its value.
    pub fn bind(
        &mut self,
        key: impl Into<ParamKey>,
        value: impl Into<RowValues>,
    ) -> &mut Self {
        self.params.bind(key.into(), value.into());
        self
    }

    /// Bind every `(key, value)` pair in order.
    pub fn bind_params<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ParamKey>,
        V: Into<RowValues>,
    {
        for (key, value) in params {
            self.bind(key, value);
        }
        self
    }

    /// The SQL after textual substitution of every bound value.
    #[must_use]
    pub fn render_literal(&self) -> String {
        let literals: Vec<String> = self.params.iter().map(|(_, v)| v.literal_text()).collect();
        substitute(&self.text, literals.iter().map(String::as_str))
    }

    /// Turn the statement into what is sent over the wire.
    ///
    /// # Errors
    ///
    /// In `Placeholders` mode, returns `RqliteDbError::ParameterError` if the
    /// statement uses named placeholders or names its bindings, if the
    /// bound positions are not exactly `1..=n`, or if `n` differs from the
    /// number of `?` placeholders.
    pub fn into_query(self, mode: SubstitutionMode) -> Result<QueryAndParams, RqliteDbError> {
        match mode {
            SubstitutionMode::Literal => Ok(QueryAndParams::new_without_params(
                self.render_literal(),
            )),
            SubstitutionMode::Placeholders => self.into_placeholder_query(),
        }
    }

    fn into_placeholder_query(self) -> Result<QueryAndParams, RqliteDbError> {
        let scan = scan_placeholders(&self.text);
        if scan.named {
            return Err(RqliteDbError::ParameterError(
                "named placeholders are not supported; use ? or ?N".to_string(),
            ));
        }

        let mut indexed = Vec::with_capacity(self.params.len());
        for (key, value) in self.params.into_entries() {
            match key {
                ParamKey::Index(i) => indexed.push((i, value)),
                ParamKey::Name(name) => {
                    return Err(RqliteDbError::ParameterError(format!(
                        "parameter {name:?} is named; placeholder binding needs positions"
                    )));
                }
            }
        }
        indexed.sort_by_key(|(i, _)| *i);

        // Positions are 1-based and must be contiguous.
        for (slot, (index, _)) in indexed.iter().enumerate() {
            let expected = slot + 1;
            if *index != expected {
                return Err(RqliteDbError::ParameterError(if *index == 0 {
                    "parameter positions start at 1, got 0".to_string()
                } else {
                    format!("no value bound for position {expected} (next bound is {index})")
                }));
            }
        }

        if indexed.len() != scan.positional {
            return Err(RqliteDbError::ParameterError(format!(
                "statement expects {} parameters, {} bound",
                scan.positional,
                indexed.len()
            )));
        }

        Ok(QueryAndParams::new(
            self.text,
            indexed.into_iter().map(|(_, v)| v).collect(),
        ))
    }
}
