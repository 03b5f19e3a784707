//! Adapter between a synchronous-style SQL client contract and rqlite's
//! HTTP/JSON API.
//!
//! - `client`: request bodies, the `/db/query` and `/db/execute` endpoints, response decoding
//! - `results`: shaping `{columns, values}` into rows
//! - `binder`: prepared statements, value substitution, escaping
//! - `adapter`: `RqliteAdapter`, the connect/prepare/bind/execute/fetch surface

pub mod adapter;
pub mod binder;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod query;
pub mod results;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapter::RqliteAdapter;
pub use error::RqliteDbError;
