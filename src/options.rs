use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::batch::ParameterizedQuery;
use crate::results::FullQueryResults;

/// Supplies a bearer token before each request. `None` or an empty string is
/// rejected before anything is sent.
pub type AuthTokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Called with each statement and its encoded parameters before it is sent.
pub type QueryCallback = Arc<dyn Fn(&ParameterizedQuery) + Send + Sync>;

/// Called after each statement's rows are decoded, with the array-mode and
/// full-results flags in effect.
pub type ResultCallback = Arc<dyn Fn(&ParameterizedQuery, &FullQueryResults, bool, bool) + Send + Sync>;

/// Settings handed to the transport unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Per-request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

/// Per-call options for queries and batches.
///
/// # Examples
/// ```rust
/// use neon_http::prelude::*;
///
/// let options = HttpQueryOptions::default()
///     .with_array_mode(true)
///     .with_full_results(true)
///     .with_auth_token(|| Some("token".to_string()));
/// # let _ = options;
/// ```
#[derive(Clone, Default)]
pub struct HttpQueryOptions {
    /// Rows come back positional instead of keyed by column name
    pub array_mode: bool,
    /// Return [`FullQueryResults`] instead of bare rows
    pub full_results: bool,
    pub fetch_options: FetchOptions,
    pub auth_token: Option<AuthTokenProvider>,
    pub query_callback: Option<QueryCallback>,
    pub result_callback: Option<ResultCallback>,
}

impl fmt::Debug for HttpQueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpQueryOptions")
            .field("array_mode", &self.array_mode)
            .field("full_results", &self.full_results)
            .field("fetch_options", &self.fetch_options)
            .field("auth_token", &self.auth_token.is_some())
            .field("query_callback", &self.query_callback.is_some())
            .field("result_callback", &self.result_callback.is_some())
            .finish()
    }
}

impl HttpQueryOptions {
    #[must_use]
    pub fn with_array_mode(mut self, array_mode: bool) -> Self {
        self.array_mode = array_mode;
        self
    }

    #[must_use]
    pub fn with_full_results(mut self, full_results: bool) -> Self {
        self.full_results = full_results;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_options.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_fetch_options(mut self, fetch_options: FetchOptions) -> Self {
        self.fetch_options = fetch_options;
        self
    }

    #[must_use]
    pub fn with_auth_token<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.auth_token = Some(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn with_query_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ParameterizedQuery) + Send + Sync + 'static,
    {
        self.query_callback = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_result_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ParameterizedQuery, &FullQueryResults, bool, bool) + Send + Sync + 'static,
    {
        self.result_callback = Some(Arc::new(callback));
        self
    }
}
