//! GitHub OAuth client.
//!
//! Provides the two outbound steps of the authorization-code flow:
//! - Code → access token (`POST /login/oauth/access_token`)
//! - Access token → user profile (`GET /user`)
//!
//! The token exchange is always a single attempt: an authorization code is
//! single-use, so replaying it after an ambiguous failure cannot succeed.
//! The profile fetch is retried when retries are enabled in [`Config`].
//! The steps never run concurrently; the profile call needs the token.

pub mod login;
pub(crate) mod middleware;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;

use crate::config::{Config, Credentials, api};
use crate::error::{AuthError, AuthResult, ClientError, ClientResult};
use crate::models::{AccessToken, GitHubUser, TokenResponse, UserProfile};

pub use login::LoginUrlBuilder;

/// GitHub OAuth exchange client.
#[derive(Clone)]
pub struct GitHubOAuthClient {
    /// HTTP client for the token exchange; never retries.
    token_client: ClientWithMiddleware,

    /// HTTP client for the profile fetch, with the configured retries.
    client: ClientWithMiddleware,

    /// Login URL builder sharing the same credentials.
    login: LoginUrlBuilder,

    /// OAuth application credentials.
    credentials: Credentials,

    /// Token endpoint.
    access_token_url: String,

    /// Authenticated user endpoint.
    user_api_url: String,
}

impl GitHubOAuthClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            token_client: middleware::build(client.clone(), 0),
            client: middleware::build(client, config.max_retries),
            login: LoginUrlBuilder::from_config(&config),
            credentials: config.credentials,
            access_token_url: config.access_token_url,
            user_api_url: config.user_api_url,
        })
    }

    /// Provider login URL the user agent should be sent to.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.login.build()
    }

    /// Exchange an authorization code for an access token.
    ///
    /// The code is forwarded as-is; the provider decides whether it is valid.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExchange`] on transport failure, a non-JSON
    /// body, a provider error body, or a missing `access_token`.
    pub async fn exchange_code_for_token(&self, code: &str) -> AuthResult<AccessToken> {
        tracing::debug!(url = %self.access_token_url, "Exchanging authorization code");

        self.request_token(code).await.map_err(|e| {
            tracing::warn!(error = %e, "Token exchange failed");
            AuthError::TokenExchange(e)
        })
    }

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ProfileFetch`] on transport failure, a non-JSON
    /// body, or a missing `id`, `login` or `avatar_url`.
    pub async fn fetch_user_profile(&self, token: &AccessToken) -> AuthResult<UserProfile> {
        tracing::debug!(url = %self.user_api_url, "Fetching user profile");

        self.request_user(token).await.map_err(|e| {
            tracing::warn!(error = %e, "User profile fetch failed");
            AuthError::ProfileFetch(e)
        })
    }

    /// Run the full flow: code → token → profile.
    ///
    /// If the token exchange fails the profile endpoint is never called.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever step failed first.
    pub async fn authenticate(&self, code: &str) -> AuthResult<UserProfile> {
        let token = self.exchange_code_for_token(code).await?;
        let profile = self.fetch_user_profile(&token).await?;

        tracing::info!(key = %profile.key, username = %profile.username, "Authenticated user");
        Ok(profile)
    }

    async fn request_token(&self, code: &str) -> ClientResult<AccessToken> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
        ];

        let response = self
            .token_client
            .post(&self.access_token_url)
            .query(&params)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let body: TokenResponse = Self::read_json(response).await?;
        body.into_access_token()
    }

    async fn request_user(&self, token: &AccessToken) -> ClientResult<UserProfile> {
        let response = self
            .client
            .get(&self.user_api_url)
            .header(AUTHORIZATION, format!("token {}", token.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let user: GitHubUser = Self::read_json(response).await?;
        user.into_profile()
    }

    /// Check the status and decode the JSON body.
    async fn read_json<T>(response: reqwest::Response) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text });
        }

        serde_json::from_str(&text).map_err(ClientError::from)
    }
}

impl std::fmt::Debug for GitHubOAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubOAuthClient")
            .field("client_id", &self.credentials.client_id)
            .field("access_token_url", &self.access_token_url)
            .field("user_api_url", &self.user_api_url)
            .finish()
    }
}
