//! Error types for the GitHub OAuth login service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Nothing here depends on the HTTP server; the mapping to status codes happens in
//! [`crate::server::handlers`].

/// Errors from a single outbound call to the identity provider.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    ///
    /// Converted through `From`, which drops the request URL: the token request
    /// carries the client secret in its query string.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Middleware error, request URL dropped as for [`ClientError::Http`].
    #[error("Middleware error: {0}")]
    Middleware(reqwest_middleware::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Provider answered with an OAuth error body (bad or expired code, etc.)
    #[error("Provider error {error}: {description}")]
    Provider {
        /// OAuth error code
        error: String,
        /// Human-readable description from the provider
        description: String,
    },

    /// A required field was absent from the response
    #[error("Response is missing required field '{field}'")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<reqwest_middleware::Error> for ClientError {
    fn from(err: reqwest_middleware::Error) -> Self {
        Self::Middleware(strip_url(err))
    }
}

/// Remove the request URL from a middleware error, including errors wrapped by
/// the retry layer.
fn strip_url(err: reqwest_middleware::Error) -> reqwest_middleware::Error {
    use reqwest_middleware::Error;
    use reqwest_retry::RetryError;

    match err {
        Error::Reqwest(e) => Error::Reqwest(e.without_url()),
        Error::Middleware(e) => match e.downcast::<RetryError>() {
            Ok(RetryError::WithRetries { retries, err }) => {
                Error::Middleware(RetryError::WithRetries { retries, err: strip_url(err) }.into())
            }
            Ok(RetryError::Error(err)) => strip_url(err),
            Err(other) => Error::Middleware(other),
        },
    }
}

impl ClientError {
    /// Create a missing field error.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

/// Errors from the OAuth authorization-code flow.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// The callback carried no authorization code.
    #[error("failed to retrieve user access token: no authorization code in callback")]
    MissingCode,

    /// Converting the authorization code into an access token failed.
    #[error("failed to retrieve user access token: {0}")]
    TokenExchange(#[source] ClientError),

    /// Fetching the profile with a held access token failed.
    #[error("failed to fetch user details: {0}")]
    ProfileFetch(#[source] ClientError),
}

impl AuthError {
    /// Fixed caller-facing message. Never includes the underlying cause.
    #[must_use]
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::MissingCode | Self::TokenExchange(_) => {
                "Error while trying to retrieve user access token"
            }
            Self::ProfileFetch(_) => "Failed to fetch user details",
        }
    }
}

/// Errors from the user profile store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The record violates the store contract (empty key).
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Remote store settings are unusable (malformed project key or URL).
    #[error("Invalid store configuration: {0}")]
    Misconfigured(String),

    /// HTTP transport error talking to a remote store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Store response was not the expected JSON
    #[error("Failed to parse store response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Remote store refused the write
    #[error("Store rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl StoreError {
    /// Fixed caller-facing message.
    #[must_use]
    pub const fn detail(&self) -> &'static str {
        "Failed to add user to users_db"
    }
}

/// Errors from loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A configuration value was empty or invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for OAuth flow operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
