use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::audit::AuditLogger;
use crate::features::users::handlers;
use crate::features::users::services::ProfileService;

#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<ProfileService>,
    pub audit: AuditLogger,
}

/// Create routes for the profile feature
///
/// Open to any authenticated role; the session middleware supplies identity.
pub fn routes(service: Arc<ProfileService>, audit: AuditLogger) -> Router {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/profile/change-password", post(handlers::change_password))
        .route("/profile/stats", get(handlers::profile_stats))
        .with_state(UsersState { service, audit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::shared::test_helpers::lazy_test_pool;

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(
            Arc::new(ProfileService::new(pool.clone())),
            crate::features::audit::AuditLogger::new(
                pool,
                Arc::new(crate::features::audit::TransientAuditSink::new()),
                Arc::new(crate::features::audit::TransientAuditSink::new()),
            ),
        )
    }

    #[tokio::test]
    async fn profile_requires_session() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/profile").await;
        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Unauthorized"
        );
    }

    #[tokio::test]
    async fn stats_requires_session() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/profile/stats").await;
        response.assert_status_unauthorized();
    }
}
