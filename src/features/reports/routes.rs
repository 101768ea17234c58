use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::audit::AuditLogger;
use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

#[derive(Clone)]
pub struct ReportsState {
    pub service: Arc<ReportService>,
    pub audit: AuditLogger,
}

/// Create routes for the victim reporting feature
pub fn routes(service: Arc<ReportService>, audit: AuditLogger) -> Router {
    Router::new()
        .route("/victim/report", post(handlers::submit_report))
        .route("/victim/reports", get(handlers::list_reports))
        .route("/victim/report/{id}", get(handlers::report_details))
        .route("/victim/report/{id}/evidence", post(handlers::add_evidence))
        .route("/victim/report/{id}/logs", get(handlers::report_logs))
        .with_state(ReportsState { service, audit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::features::audit::{AuditLogger, TransientAuditSink};
    use crate::modules::storage::EvidenceStore;
    use crate::shared::test_helpers::{lazy_test_pool, officer_user, with_session_user};

    fn router() -> Router {
        let pool = lazy_test_pool();
        let store = Arc::new(
            EvidenceStore::new(&crate::core::config::UploadsConfig {
                directory: std::env::temp_dir().join("report-route-tests"),
                serve_static: false,
            })
            .unwrap(),
        );
        routes(
            Arc::new(ReportService::new(pool.clone(), store)),
            AuditLogger::new(
                pool,
                Arc::new(TransientAuditSink::new()),
                Arc::new(TransientAuditSink::new()),
            ),
        )
    }

    #[tokio::test]
    async fn victim_routes_reject_anonymous_requests() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/victim/reports").await;
        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Unauthorized"
        );
    }

    #[tokio::test]
    async fn victim_routes_reject_officer_sessions() {
        let server =
            TestServer::new(with_session_user(router(), officer_user())).unwrap();
        let response = server.get("/victim/reports").await;
        response.assert_status_unauthorized();
    }
}
