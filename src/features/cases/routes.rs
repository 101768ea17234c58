use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::cases::handlers;
use crate::features::cases::services::CaseService;

#[derive(Clone)]
pub struct CasesState {
    pub service: Arc<CaseService>,
}

/// Create routes for the officer casework feature
pub fn routes(service: Arc<CaseService>) -> Router {
    Router::new()
        .route("/officer/assigned_cases", get(handlers::assigned_cases))
        .route(
            "/officer/case/{id}",
            get(handlers::case_details).put(handlers::update_status),
        )
        .route(
            "/officer/case/{id}/evidence",
            get(handlers::case_evidence).post(handlers::upload_case_evidence),
        )
        .route(
            "/officer/case/{id}/logs",
            get(handlers::case_logs).post(handlers::add_case_log),
        )
        .route("/officer/workload", get(handlers::workload))
        .route("/officer/all_evidence", get(handlers::all_evidence))
        .with_state(CasesState { service })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::modules::storage::EvidenceStore;
    use crate::shared::test_helpers::{admin_user, lazy_test_pool, with_session_user};

    fn router() -> Router {
        let store = Arc::new(
            EvidenceStore::new(&crate::core::config::UploadsConfig {
                directory: std::env::temp_dir().join("case-route-tests"),
                serve_static: false,
            })
            .unwrap(),
        );
        routes(Arc::new(CaseService::new(lazy_test_pool(), store)))
    }

    #[tokio::test]
    async fn officer_routes_reject_anonymous_requests() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/officer/assigned_cases").await;
        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Unauthorized"
        );
    }

    #[tokio::test]
    async fn officer_routes_reject_admin_sessions() {
        let server = TestServer::new(with_session_user(router(), admin_user())).unwrap();
        let response = server.get("/officer/workload").await;
        response.assert_status_unauthorized();
    }
}
