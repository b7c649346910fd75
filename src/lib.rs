//! PostgreSQL text-format value adaptation for Neon's SQL-over-HTTP endpoint.
//!
//! Parameters are encoded from [`PgValue`] into the server's text format,
//! sent as JSON over HTTPS, and result rows are decoded back by type OID
//! through a [`TypeCatalog`].
//!
//! ```rust,no_run
//! use neon_http::prelude::*;
//!
//! # async fn run() -> Result<(), NeonHttpError> {
//! let client = NeonClient::from_env()?;
//! let results = client
//!     .transaction(
//!         &[
//!             QueryAndParams::new("INSERT INTO users (name) VALUES ($1)", vec!["alice".into()]),
//!             QueryAndParams::new_without_params("SELECT count(*) FROM users"),
//!         ],
//!         &TransactionOptions::default(),
//!     )
//!     .await?;
//! # let _ = results;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod options;
pub mod prelude;
pub mod query;
pub mod results;
pub mod transaction;
pub mod transport;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use batch::{ParameterizedQuery, RequestBody};
pub use catalog::{TypeCatalog, TypeRule};
pub use client::NeonClient;
pub use config::ConnectionConfig;
pub use decode::decode;
pub use encode::{encode, encode_params};
pub use error::{NeonHttpError, Result};
pub use format::IntervalStyle;
pub use options::{FetchOptions, HttpQueryOptions};
pub use query::QueryAndParams;
pub use results::{FieldDef, FullQueryResults, NamedRow, QueryResult, Row};
pub use transaction::{IsolationLevel, TransactionMode, TransactionOptions};
pub use transport::Transport;
pub use types::{IpNetwork, PgInterval, PgNumeric, PgValue};
