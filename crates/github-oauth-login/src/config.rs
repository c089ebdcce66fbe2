//! Configuration for the GitHub OAuth login service.

use std::time::Duration;

use crate::error::ConfigError;

/// Provider endpoints and client defaults.
pub mod api {
    use std::time::Duration;

    /// GitHub interactive authorization endpoint.
    pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

    /// GitHub code-for-token exchange endpoint.
    pub const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

    /// Authenticated user endpoint of the GitHub REST API.
    pub const USER_API_URL: &str = "https://api.github.com/user";

    /// Scope requested when none is configured.
    pub const DEFAULT_SCOPE: &str = "read:user";

    /// Request timeout for outbound provider calls.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// GitHub rejects API calls without a User-Agent.
    pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
}

/// Deta Base defaults for the HTTP key-value backend.
pub mod storage {
    /// Base URL of the Deta Base HTTP API.
    pub const DETA_API_URL: &str = "https://database.deta.sh/v1";

    /// Base (table) holding user profiles.
    pub const USERS_BASE: &str = "users";
}

/// OAuth application credentials, loaded once at startup.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth application client ID.
    pub client_id: String,

    /// OAuth application client secret. Never logged.
    pub client_secret: String,

    /// Callback URL registered with the provider.
    pub redirect_uri: String,

    /// Requested scope.
    pub scope: String,

    /// Whether unauthenticated users may sign up during the consent flow.
    pub allow_signup: bool,
}

impl Credentials {
    /// Create credentials with the default scope and signup allowed.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: api::DEFAULT_SCOPE.to_string(),
            allow_signup: true,
        }
    }

    /// Override the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Override the signup flag.
    #[must_use]
    pub const fn with_allow_signup(mut self, allow_signup: bool) -> Self {
        self.allow_signup = allow_signup;
        self
    }

    /// Check that every required field is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("allow_signup", &self.allow_signup)
            .finish()
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth application credentials.
    pub credentials: Credentials,

    /// Authorization endpoint (overridable for mock servers).
    pub authorize_url: String,

    /// Token endpoint (overridable for mock servers).
    pub access_token_url: String,

    /// Authenticated user endpoint (overridable for mock servers).
    pub user_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries on transient failures. Zero disables the retry middleware.
    /// Applies to the profile fetch and store calls, never to the token exchange.
    pub max_retries: u32,
}

impl Config {
    /// Create a configuration against the public GitHub endpoints.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authorize_url: api::AUTHORIZE_URL.to_string(),
            access_token_url: api::ACCESS_TOKEN_URL.to_string(),
            user_api_url: api::USER_API_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: 0,
        }
    }

    /// Create a test configuration with every endpoint under `base_url`.
    #[must_use]
    pub fn for_testing(base_url: &str, credentials: Credentials) -> Self {
        Self {
            credentials,
            authorize_url: format!("{base_url}/login/oauth/authorize"),
            access_token_url: format!("{base_url}/login/oauth/access_token"),
            user_api_url: format!("{base_url}/user"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the number of transient-failure retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Persistence backend selection.
#[derive(Clone)]
pub enum StorageConfig {
    /// Process-local map; records are lost on restart.
    Memory,

    /// Deta-Base-compatible HTTP key-value store.
    Deta {
        /// Project key in the form `<project_id>_<secret>`.
        project_key: String,
        /// Base (table) name.
        base_name: String,
        /// API root, overridable for mock servers.
        api_url: String,
    },
}

impl StorageConfig {
    /// Pick the Deta backend when a non-empty project key is present.
    #[must_use]
    pub fn from_project_key(project_key: Option<String>, base_name: impl Into<String>) -> Self {
        match project_key.filter(|k| !k.trim().is_empty()) {
            Some(project_key) => Self::Deta {
                project_key,
                base_name: base_name.into(),
                api_url: storage::DETA_API_URL.to_string(),
            },
            None => Self::Memory,
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Deta { .. } => "deta",
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Deta { base_name, api_url, .. } => f
                .debug_struct("Deta")
                .field("base_name", base_name)
                .field("api_url", api_url)
                .finish(),
        }
    }
}
