//! GitHub user payload and the stored profile record.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Subset of the `GET /user` response the login flow reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubUser {
    /// Numeric user ID, stable across username changes.
    #[serde(default)]
    pub id: Option<u64>,

    /// Username.
    #[serde(default)]
    pub login: Option<String>,

    /// Public email; null when the user hides it.
    #[serde(default)]
    pub email: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl GitHubUser {
    /// Map to the stored profile. `id`, `login` and `avatar_url` are required.
    pub fn into_profile(self) -> ClientResult<UserProfile> {
        let id = self.id.ok_or(ClientError::missing_field("id"))?;
        let username = self.login.ok_or(ClientError::missing_field("login"))?;
        let avatar_url = self.avatar_url.ok_or(ClientError::missing_field("avatar_url"))?;

        Ok(UserProfile { key: id.to_string(), email: self.email, username, avatar_url })
    }
}

/// Authenticated user record handed to the store. `key` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider user ID as a string.
    pub key: String,

    /// Email, absent when the provider withholds it.
    #[serde(default)]
    pub email: Option<String>,

    /// Provider username.
    pub username: String,

    /// Avatar image URL.
    pub avatar_url: String,
}

impl UserProfile {
    /// A record is storable only with a non-empty key.
    #[must_use]
    pub fn has_valid_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_maps_fields_and_null_email() {
        let user: GitHubUser = serde_json::from_value(
            json!({"id": 123, "email": null, "login": "alice", "avatar_url": "http://x"}),
        )
        .unwrap();
        let profile = user.into_profile().unwrap();

        assert_eq!(
            profile,
            UserProfile {
                key: "123".into(),
                email: None,
                username: "alice".into(),
                avatar_url: "http://x".into(),
            }
        );
    }

    #[test]
    fn test_absent_email_tolerated() {
        let user: GitHubUser =
            serde_json::from_value(json!({"id": 7, "login": "carol", "avatar_url": "u"})).unwrap();
        assert!(user.into_profile().unwrap().email.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let user: GitHubUser =
            serde_json::from_value(json!({"login": "alice", "avatar_url": "u"})).unwrap();
        assert!(matches!(user.into_profile(), Err(ClientError::MissingField { field: "id" })));

        let user: GitHubUser = serde_json::from_value(json!({"id": 1, "avatar_url": "u"})).unwrap();
        assert!(matches!(user.into_profile(), Err(ClientError::MissingField { field: "login" })));
    }

    #[test]
    fn test_profile_serializes_null_email() {
        let profile = UserProfile {
            key: "1".into(),
            email: None,
            username: "bob".into(),
            avatar_url: "u".into(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value, json!({"key": "1", "email": null, "username": "bob", "avatar_url": "u"}));
        assert!(profile.has_valid_key());
    }
}
