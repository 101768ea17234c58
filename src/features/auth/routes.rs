use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::audit::AuditLogger;
use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
    pub audit: AuditLogger,
}

/// Create routes for the auth feature
///
/// Note: These endpoints are public; the session cookie is issued here.
pub fn routes(service: Arc<AuthService>, audit: AuditLogger) -> Router {
    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .with_state(AuthState { service, audit })
}
