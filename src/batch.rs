//! Request assembly: encoded statements, the JSON body and the mode headers.

use serde::Serialize;

use crate::encode::encode_params;
use crate::error::Result;
use crate::query::QueryAndParams;
use crate::transaction::TransactionMode;

pub const CONNECTION_STRING_HEADER: &str = "Neon-Connection-String";
pub const RAW_TEXT_OUTPUT_HEADER: &str = "Neon-Raw-Text-Output";
pub const ARRAY_MODE_HEADER: &str = "Neon-Array-Mode";
pub const ISOLATION_LEVEL_HEADER: &str = "Neon-Batch-Isolation-Level";
pub const READ_ONLY_HEADER: &str = "Neon-Batch-Read-Only";
pub const DEFERRABLE_HEADER: &str = "Neon-Batch-Deferrable";

/// A statement with its parameters already in text form. `None` is NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterizedQuery {
    pub query: String,
    pub params: Vec<Option<String>>,
}

/// The JSON body of a request: one statement, or a batch run as one
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Single(ParameterizedQuery),
    Batch { queries: Vec<ParameterizedQuery> },
}

/// A prepared batch: the body plus the headers describing its transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBatch {
    pub body: RequestBody,
    pub headers: Vec<(&'static str, String)>,
}

impl PreparedBatch {
    #[must_use]
    pub fn statements(&self) -> &[ParameterizedQuery] {
        match &self.body {
            RequestBody::Single(statement) => std::slice::from_ref(statement),
            RequestBody::Batch { queries } => queries,
        }
    }
}

/// Encode one statement's parameters.
///
/// # Errors
/// Returns `NeonHttpError::Encode` for the first parameter that cannot be
/// encoded.
pub fn prepare_statement(statement: &QueryAndParams) -> Result<ParameterizedQuery> {
    Ok(ParameterizedQuery {
        query: statement.query.clone(),
        params: encode_params(&statement.params)?,
    })
}

/// Headers that carry a transaction mode.
#[must_use]
pub fn transaction_headers(mode: &TransactionMode) -> Vec<(&'static str, String)> {
    vec![
        (ISOLATION_LEVEL_HEADER, mode.isolation_level().as_str().to_string()),
        (READ_ONLY_HEADER, mode.read_only().to_string()),
        (DEFERRABLE_HEADER, mode.deferrable().to_string()),
    ]
}

/// Encode every statement and wrap them as a `{"queries": [...]}` body.
///
/// `mode` was validated when it was built, so nothing is encoded under an
/// invalid configuration.
///
/// # Errors
/// Returns `NeonHttpError::Encode` if any parameter of any statement cannot
/// be encoded; no partial batch is returned.
pub fn prepare_batch(statements: &[QueryAndParams], mode: &TransactionMode) -> Result<PreparedBatch> {
    let queries = statements
        .iter()
        .map(prepare_statement)
        .collect::<Result<Vec<_>>>()?;
    Ok(PreparedBatch {
        body: RequestBody::Batch { queries },
        headers: transaction_headers(mode),
    })
}
