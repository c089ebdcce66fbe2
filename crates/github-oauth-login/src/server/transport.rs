//! Router construction and shared handler state.

use std::sync::Arc;

use axum::{Json, Router, response::IntoResponse, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::client::GitHubOAuthClient;
use crate::store::UserStore;

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub client: GitHubOAuthClient,
    pub store: Arc<dyn UserStore>,
}

/// Create the HTTP router.
pub fn create_router(client: GitHubOAuthClient, store: Arc<dyn UserStore>) -> Router {
    let state = Arc::new(HttpState { client, store });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/github/login", get(handlers::handle_login))
        .route("/github/login/url", get(handlers::handle_login_url))
        .route("/authenticate/github", get(handlers::handle_authenticate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "github-oauth-login",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
