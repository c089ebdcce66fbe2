//! GitHub OAuth Login
//!
//! A small service that signs users in with GitHub and stores a minimal
//! profile for each of them in a key-value store.
//!
//! # Flow
//!
//! 1. `GET /github/login` redirects to GitHub's consent page
//! 2. GitHub redirects back to `GET /authenticate/github?code=...`
//! 3. The code is exchanged for an access token, the token for the user profile
//! 4. The profile is upserted into the configured [`store::UserStore`]
//!
//! # Example
//!
//! ```no_run
//! use github_oauth_login::{Config, Credentials, GitHubOAuthClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::new("client-id", "client-secret", "https://example.com/cb");
//!     let client = GitHubOAuthClient::new(Config::new(credentials))?;
//!
//!     println!("{}", client.login_url());
//!     let profile = client.authenticate("code-from-callback").await?;
//!     println!("{}", profile.username);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

pub use client::{GitHubOAuthClient, LoginUrlBuilder};
pub use config::{Config, Credentials, StorageConfig};
pub use error::{AuthError, ClientError, ConfigError, StoreError};
pub use models::UserProfile;
