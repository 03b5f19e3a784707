//! Row data produced from rqlite responses.

mod row;
mod shape;

pub use row::CustomDbRow;
pub use shape::{Cardinality, shape, shape_with};

/// A shaped statement result: one mapping or a sequence of mappings.
///
/// Which one a response becomes depends on the `Cardinality` it was shaped
/// with; callers reading a result handed back as-is must handle both.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    /// Exactly one logical row
    Single(CustomDbRow),
    /// Zero or more rows, in response order
    Rows(Vec<CustomDbRow>),
}

impl Default for NormalizedResult {
    fn default() -> Self {
        NormalizedResult::Rows(Vec::new())
    }
}

impl NormalizedResult {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            NormalizedResult::Single(_) => 1,
            NormalizedResult::Rows(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, NormalizedResult::Single(_))
    }

    /// View the result as a slice of rows regardless of shape.
    #[must_use]
    pub fn rows(&self) -> &[CustomDbRow] {
        match self {
            NormalizedResult::Single(row) => std::slice::from_ref(row),
            NormalizedResult::Rows(rows) => rows,
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&CustomDbRow> {
        self.rows().first()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<CustomDbRow> {
        match self {
            NormalizedResult::Single(row) => vec![row],
            NormalizedResult::Rows(rows) => rows,
        }
    }

    /// Remove and return the last row.
    ///
    /// A `Single` result hands out its row and becomes an empty sequence.
    pub fn pop(&mut self) -> Option<CustomDbRow> {
        match self {
            NormalizedResult::Rows(rows) => rows.pop(),
            NormalizedResult::Single(_) => match std::mem::take(self) {
                NormalizedResult::Single(row) => Some(row),
                NormalizedResult::Rows(_) => None,
            },
        }
    }
}
