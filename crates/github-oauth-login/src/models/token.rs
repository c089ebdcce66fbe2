//! Token endpoint response and the in-flight access token.

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Body returned by the provider's token endpoint.
///
/// GitHub answers `200 OK` even for a rejected code and signals the failure
/// through `error`/`error_description`, so both shapes share one struct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    /// Bearer credential.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Token type (GitHub always sends "bearer").
    #[serde(default)]
    pub token_type: Option<String>,

    /// Granted scopes, comma-separated.
    #[serde(default)]
    pub scope: Option<String>,

    /// OAuth error code.
    #[serde(default)]
    pub error: Option<String>,

    /// OAuth error description.
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Extract the access token, or the reason there is none.
    pub fn into_access_token(self) -> ClientResult<AccessToken> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Err(ClientError::Provider {
                description: self.error_description.unwrap_or_else(|| error.clone()),
                error,
            });
        }

        self.access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
            .ok_or(ClientError::missing_field("access_token"))
    }
}

/// Opaque bearer credential, valid for the duration of one login request.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the Authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
