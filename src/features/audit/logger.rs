use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crate::features::audit::sink::{AuditEvent, AuditSink};

/// Records audit events around authentication and admin actions. Failures are
/// logged and swallowed; auditing never turns a successful request into an
/// error.
#[derive(Clone)]
pub struct AuditLogger {
    pool: PgPool,
    primary: Arc<dyn AuditSink>,
    fallback: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(pool: PgPool, primary: Arc<dyn AuditSink>, fallback: Arc<dyn AuditSink>) -> Self {
        Self {
            pool,
            primary,
            fallback,
        }
    }

    /// Record an event for a known user id.
    pub async fn log(&self, user_id: Option<i64>, action: &str, details: &str, ip_address: &str) {
        let event = AuditEvent {
            user_id,
            action: action.to_string(),
            details: details.to_string(),
            status: "Success".to_string(),
            ip_address: ip_address.to_string(),
            timestamp: Utc::now(),
        };

        if let Err(e) = self.primary.record(&event).await {
            tracing::error!(error = %e, action = %event.action, "Audit write failed, using fallback sink");
            if let Err(e) = self.fallback.record(&event).await {
                tracing::error!(error = %e, action = %event.action, "Fallback audit write failed");
            }
        }
    }

    /// Record an event for an actor identified only by email, resolving the
    /// user id when the account exists. Used on login paths where no session
    /// is established yet.
    pub async fn log_by_email(&self, email: &str, action: &str, details: &str, ip_address: &str) {
        let user_id = match sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve audit actor by email");
                None
            }
        };

        self.log(user_id, action, details, ip_address).await;
    }
}
