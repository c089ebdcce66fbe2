//! Login and callback handlers.
//!
//! Every failure in the callback is answered with `401 Unauthorized` and a
//! fixed `{"detail": ...}` body per failing step; causes go to the log only.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::transport::HttpState;
use crate::error::{AuthError, StoreError};

/// Failure at the request boundary.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The OAuth exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storing the authenticated profile failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Fixed caller-facing message for this failure.
    #[must_use]
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.detail(),
            Self::Store(e) => e.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Login callback failed");
        (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "detail": self.detail() })))
            .into_response()
    }
}

/// `GET /github/login`
///
/// Redirect the user agent to the provider's consent page.
pub async fn handle_login(State(state): State<Arc<HttpState>>) -> Redirect {
    Redirect::temporary(&state.client.login_url())
}

/// `GET /github/login/url`
///
/// The same login URL as a plain string body, for clients that navigate themselves.
pub async fn handle_login_url(State(state): State<Arc<HttpState>>) -> String {
    state.client.login_url()
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by the provider when the user denies consent.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /authenticate/github?code=...`
///
/// Exchange the code, fetch the profile and upsert it into the store.
/// A query that does not parse (e.g. a repeated `code`) counts as a missing code.
pub async fn handle_authenticate(
    State(state): State<Arc<HttpState>>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Malformed callback query");
        AuthError::MissingCode
    })?;

    if let Some(ref error) = query.error {
        tracing::info!(
            error = %error,
            description = query.error_description.as_deref().unwrap_or_default(),
            "Provider redirected with an error"
        );
    }

    let Some(code) = query.code else {
        return Err(AuthError::MissingCode.into());
    };

    let profile = state.client.authenticate(&code).await?;
    let stored = state.store.put(profile).await?;

    tracing::info!(key = %stored.key, "Stored user profile");
    Ok(Json(stored).into_response())
}
