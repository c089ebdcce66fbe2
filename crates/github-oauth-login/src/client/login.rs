//! Authorization URL construction.

use url::form_urlencoded;

use crate::config::{Config, Credentials};

/// Builds the provider login URL from the configured credentials.
///
/// Pure string construction: no I/O and no failure modes.
#[derive(Debug, Clone)]
pub struct LoginUrlBuilder {
    authorize_url: String,
    credentials: Credentials,
}

impl LoginUrlBuilder {
    /// Create a builder for an explicit authorization endpoint.
    #[must_use]
    pub fn new(authorize_url: impl Into<String>, credentials: Credentials) -> Self {
        Self { authorize_url: authorize_url.into(), credentials }
    }

    /// Create a builder from the client configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.authorize_url.clone(), config.credentials.clone())
    }

    /// Render the login URL.
    ///
    /// The query carries exactly `client_id`, `redirect_uri`, `scope` and
    /// `allow_signup`, form-urlencoded, in that order.
    #[must_use]
    pub fn build(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("scope", &self.credentials.scope)
            .append_pair("allow_signup", if self.credentials.allow_signup { "true" } else { "false" })
            .finish();

        format!("{}?{}", self.authorize_url, query)
    }
}
