//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::adapter::RqliteAdapter;
pub use crate::binder::{ParamKey, Statement, SubstitutionMode, escape};
pub use crate::client::{HttpTransport, RawResponse, ResponseMeta, Transport};
pub use crate::config::{ConnectionOptions, ConnectionOptionsBuilder, DEFAULT_URL};
pub use crate::error::RqliteDbError;
pub use crate::query::QueryAndParams;
pub use crate::results::{Cardinality, CustomDbRow, NormalizedResult};
pub use crate::types::{Endpoint, ParamType, RowValues};
