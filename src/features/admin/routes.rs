use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;
use crate::features::audit::AuditLogger;

#[derive(Clone)]
pub struct AdminState {
    pub service: Arc<AdminService>,
    pub audit: AuditLogger,
}

/// Create routes for the admin feature
pub fn routes(service: Arc<AdminService>, audit: AuditLogger) -> Router {
    Router::new()
        .route("/admin/assign", post(handlers::assign_officer))
        .route("/admin/analytics", get(handlers::analytics))
        .route("/admin/active_cases", get(handlers::active_cases))
        .route("/admin/officer_performance", get(handlers::officer_performance))
        .route("/admin/audit_trail", get(handlers::audit_trail))
        .route("/admin/all_reports", get(handlers::all_reports))
        .route("/admin/available_officers", get(handlers::available_officers))
        .route("/admin/users", get(handlers::list_users))
        .route("/admin/users/stats", get(handlers::user_stats))
        .route(
            "/admin/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route("/admin/audit_logs", get(handlers::audit_logs))
        .route("/admin/audit_logs/reset", delete(handlers::reset_audit_logs))
        .with_state(AdminState { service, audit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::features::audit::{AuditLogger, TransientAuditSink};
    use crate::shared::test_helpers::{
        admin_user, lazy_test_pool, victim_user, with_session_user,
    };

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(
            Arc::new(AdminService::new(pool.clone())),
            AuditLogger::new(
                pool,
                Arc::new(TransientAuditSink::new()),
                Arc::new(TransientAuditSink::new()),
            ),
        )
    }

    #[tokio::test]
    async fn admin_routes_reject_anonymous_requests() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/admin/analytics").await;
        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Unauthorized"
        );
    }

    #[tokio::test]
    async fn admin_routes_reject_victim_sessions() {
        let server = TestServer::new(with_session_user(router(), victim_user())).unwrap();
        let response = server.get("/admin/users").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn assign_requires_both_ids() {
        let server = TestServer::new(with_session_user(router(), admin_user())).unwrap();
        let response = server
            .post("/admin/assign")
            .json(&serde_json::json!({ "report_id": 1 }))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Report ID and Officer ID are required"
        );
    }
}
