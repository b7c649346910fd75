use crate::types::PgValue;

/// A SQL string and its bound parameters bundled together.
///
/// Placeholders are positional (`$1`, `$2`, ...):
/// ```rust
/// use neon_http::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "INSERT INTO t (id, name) VALUES ($1, $2)",
///     vec![PgValue::Int(1), PgValue::Text("alice".into())],
/// );
/// # let _ = qp;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: Vec<PgValue>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters
    pub fn new(query: impl Into<String>, params: Vec<PgValue>) -> Self {
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
}

impl<Q: Into<String>> From<(Q, Vec<PgValue>)> for QueryAndParams {
    fn from((query, params): (Q, Vec<PgValue>)) -> Self {
        Self::new(query, params)
    }
}
