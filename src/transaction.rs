use std::fmt;

use clap::ValueEnum;

use crate::error::{NeonHttpError, Result};
use crate::options::HttpQueryOptions;

/// Transaction isolation level for batched statements.
///
/// Usable as a CLI flag:
/// ```rust
/// use clap::ValueEnum;
/// use neon_http::IsolationLevel;
///
/// let level = IsolationLevel::from_str("serializable", true).unwrap();
/// assert_eq!(level.as_str(), "Serializable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum IsolationLevel {
    #[default]
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Name sent in the `Neon-Batch-Isolation-Level` header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "ReadUncommitted",
            IsolationLevel::ReadCommitted => "ReadCommitted",
            IsolationLevel::RepeatableRead => "RepeatableRead",
            IsolationLevel::Serializable => "Serializable",
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Isolation level plus access flags for a batch.
///
/// Only valid combinations can be built: `DEFERRABLE` requires
/// `SERIALIZABLE` and `READ ONLY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionMode {
    isolation_level: IsolationLevel,
    read_only: bool,
    deferrable: bool,
}

impl TransactionMode {
    /// # Errors
    /// Returns `NeonHttpError::TransactionConfig` when `deferrable` is set
    /// without `Serializable` and `read_only`.
    pub fn new(isolation_level: IsolationLevel, read_only: bool, deferrable: bool) -> Result<Self> {
        if deferrable && !(isolation_level == IsolationLevel::Serializable && read_only) {
            return Err(NeonHttpError::TransactionConfig {
                isolation_level,
                read_only,
                deferrable,
            });
        }
        Ok(Self {
            isolation_level,
            read_only,
            deferrable,
        })
    }

    #[must_use]
    pub fn isolation_level(&self) -> IsolationLevel {
        self.isolation_level
    }

    #[must_use]
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn deferrable(&self) -> bool {
        self.deferrable
    }
}

/// Per-call options for [`NeonClient::transaction`](crate::NeonClient::transaction).
///
/// # Examples
/// ```rust
/// use neon_http::prelude::*;
///
/// let options = TransactionOptions::default()
///     .with_mode(TransactionMode::new(IsolationLevel::Serializable, true, true)?)
///     .with_query_options(HttpQueryOptions::default().with_array_mode(true));
/// # let _ = options;
/// # Ok::<(), NeonHttpError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// Options applied to every statement of the batch
    pub query_options: HttpQueryOptions,
    pub mode: TransactionMode,
}

impl TransactionOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: TransactionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_query_options(mut self, query_options: HttpQueryOptions) -> Self {
        self.query_options = query_options;
        self
    }
}
