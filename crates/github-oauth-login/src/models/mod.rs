//! Data models for the GitHub OAuth flow and stored user profiles.
//!
//! Provider responses are deserialized leniently (every field defaults) and
//! then checked field by field, so a missing value surfaces as a named
//! [`crate::error::ClientError::MissingField`] instead of a serde message.

mod token;
mod user;

pub use token::{AccessToken, TokenResponse};
pub use user::{GitHubUser, UserProfile};
