use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Timestamp format used across the API.
pub fn fmt_datetime(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn fmt_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Evidence attachment as returned by report and case endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvidenceDto {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub description: String,
    pub upload_date: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvidenceListResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub evidence: Vec<EvidenceDto>,
}

/// One case log entry, with the acting officer resolved when still present.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseLogDto {
    pub id: i64,
    pub report_id: i64,
    pub officer_id: i64,
    pub action: String,
    pub notes: String,
    pub log_date: String,
    pub status: Option<String>,
    pub officer_name: Option<String>,
    pub officer_email: Option<String>,
    /// Date part of `log_date`, kept for older clients.
    pub date: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseLogsResponseDto {
    pub logs: Vec<CaseLogDto>,
}
