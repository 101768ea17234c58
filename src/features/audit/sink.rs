use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::shared::constants::TRANSIENT_AUDIT_CAPACITY;

/// One audit record, already resolved to a user id where possible.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub user_id: Option<i64>,
    pub action: String,
    pub details: String,
    pub status: String,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}

/// Destination for audit events. Writing must never fail the request that
/// produced the event; callers fall back to a secondary sink on error.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: &AuditEvent) -> Result<(), sqlx::Error>;
}

/// Durable sink backed by the `audit_logs` table.
pub struct PostgresAuditSink {
    pool: PgPool,
}

impl PostgresAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PostgresAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, action, details, status, ip_address, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.user_id)
        .bind(&event.action)
        .bind(&event.details)
        .bind(&event.status)
        .bind(&event.ip_address)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory ring buffer used when the database sink is unavailable. Keeps
/// the most recent events up to a fixed capacity.
pub struct TransientAuditSink {
    events: Mutex<VecDeque<AuditEvent>>,
    capacity: usize,
}

impl TransientAuditSink {
    pub fn new() -> Self {
        Self::with_capacity(TRANSIENT_AUDIT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TransientAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for TransientAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), sqlx::Error> {
        if let Ok(mut events) = self.events.lock() {
            if events.len() == self.capacity {
                events.pop_front();
            }
            events.push_back(event.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: &str) -> AuditEvent {
        AuditEvent {
            user_id: Some(1),
            action: action.to_string(),
            details: "details".to_string(),
            status: "Success".to_string(),
            ip_address: "127.0.0.1".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn transient_sink_stores_events() {
        let sink = TransientAuditSink::with_capacity(10);
        sink.record(&event("LOGIN")).await.unwrap();
        sink.record(&event("SIGNUP")).await.unwrap();
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn transient_sink_drops_oldest_past_capacity() {
        let sink = TransientAuditSink::with_capacity(2);
        sink.record(&event("A")).await.unwrap();
        sink.record(&event("B")).await.unwrap();
        sink.record(&event("C")).await.unwrap();

        assert_eq!(sink.len(), 2);
        let events = sink.events.lock().unwrap();
        assert_eq!(events.front().unwrap().action, "B");
        assert_eq!(events.back().unwrap().action, "C");
    }
}
