//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::client::NeonClient;
pub use crate::config::ConnectionConfig;
pub use crate::error::NeonHttpError;
pub use crate::options::{FetchOptions, HttpQueryOptions};
pub use crate::query::QueryAndParams;
pub use crate::results::{FieldDef, FullQueryResults, NamedRow, QueryResult, Row};
pub use crate::transaction::{IsolationLevel, TransactionMode, TransactionOptions};
pub use crate::types::{IpNetwork, PgInterval, PgNumeric, PgValue};

pub use crate::catalog::{TypeCatalog, oid};
pub use crate::format::IntervalStyle;

#[cfg(feature = "reqwest")]
pub use crate::transport::ReqwestTransport;
