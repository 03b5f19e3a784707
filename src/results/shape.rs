use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::NormalizedResult;
use super::row::{CustomDbRow, build_index};
use crate::error::RqliteDbError;
use crate::types::RowValues;

/// How many rows a response is taken to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Guess from the shape of `values`: no nested arrays means one row,
    /// otherwise one row per inner array.
    ///
    /// A single-column result whose values arrive flat (`["a", "b"]`) is read
    /// as one row, so its row count is wrong; use `Many` when that matters.
    #[default]
    Infer,
    /// Exactly one row: flat `values`, or the first inner array.
    One,
    /// Always a sequence. Flat values of a single-column result become one
    /// row each.
    Many,
}

/// Shape `columns`/`values` with the inferring rule.
///
/// # Errors
///
/// Returns `RqliteDbError::MalformedResponse` if a row is not an array or its
/// length differs from the column count.
pub fn shape(columns: &[String], values: &[JsonValue]) -> Result<NormalizedResult, RqliteDbError> {
    shape_with(columns, values, Cardinality::Infer)
}

/// Shape `columns`/`values` under an explicit cardinality.
///
/// An empty `values` is an empty sequence under every cardinality.
///
/// # Errors
///
/// Returns `RqliteDbError::MalformedResponse` if a row is not an array or its
/// length differs from the column count.
pub fn shape_with(
    columns: &[String],
    values: &[JsonValue],
    cardinality: Cardinality,
) -> Result<NormalizedResult, RqliteDbError> {
    if values.is_empty() {
        return Ok(NormalizedResult::Rows(Vec::new()));
    }

    let builder = RowBuilder::new(columns);
    let nested = values.iter().any(JsonValue::is_array);

    let shaped = match (cardinality, nested) {
        (Cardinality::Infer | Cardinality::One, false) => {
            NormalizedResult::Single(builder.row(values)?)
        }
        (Cardinality::One, true) => NormalizedResult::Single(builder.nested_row(0, &values[0])?),
        (Cardinality::Infer | Cardinality::Many, true) => NormalizedResult::Rows(
            values
                .iter()
                .enumerate()
                .map(|(i, row)| builder.nested_row(i, row))
                .collect::<Result<_, _>>()?,
        ),
        (Cardinality::Many, false) if columns.len() == 1 => NormalizedResult::Rows(
            values
                .iter()
                .map(|value| builder.row(std::slice::from_ref(value)))
                .collect::<Result<_, _>>()?,
        ),
        (Cardinality::Many, false) => NormalizedResult::Rows(vec![builder.row(values)?]),
    };
    Ok(shaped)
}

struct RowBuilder {
    names: Arc<Vec<String>>,
    index: Arc<HashMap<String, usize>>,
}

impl RowBuilder {
    fn new(columns: &[String]) -> Self {
        Self {
            names: Arc::new(columns.to_vec()),
            index: Arc::new(build_index(columns)),
        }
    }

    fn nested_row(&self, position: usize, row: &JsonValue) -> Result<CustomDbRow, RqliteDbError> {
        let cells = row.as_array().ok_or_else(|| {
            RqliteDbError::MalformedResponse(format!("row {position} is not an array"))
        })?;
        self.row(cells)
    }

    fn row(&self, cells: &[JsonValue]) -> Result<CustomDbRow, RqliteDbError> {
        if cells.len() != self.names.len() {
            return Err(RqliteDbError::MalformedResponse(format!(
                "row has {} values for {} columns",
                cells.len(),
                self.names.len()
            )));
        }
        Ok(CustomDbRow::with_cache(
            Arc::clone(&self.names),
            cells.iter().map(RowValues::from_json).collect(),
            Arc::clone(&self.index),
        ))
    }
}
