use chrono::{DateTime, NaiveDate, Utc};

use crate::shared::types::{fmt_date, fmt_datetime, CaseLogDto, EvidenceDto};

#[derive(Debug, sqlx::FromRow)]
pub struct EvidenceRow {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub description: String,
    pub upload_date: DateTime<Utc>,
}

impl From<EvidenceRow> for EvidenceDto {
    fn from(r: EvidenceRow) -> Self {
        Self {
            id: r.id,
            filename: r.filename,
            original_name: r.original_name,
            content_type: r.content_type,
            file_size: r.file_size,
            description: r.description,
            upload_date: fmt_datetime(&r.upload_date),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct CaseLogRow {
    pub id: i64,
    pub report_id: i64,
    pub officer_id: i64,
    pub action: String,
    pub notes: String,
    pub log_date: DateTime<Utc>,
    pub status: Option<String>,
    pub officer_name: Option<String>,
    pub officer_email: Option<String>,
}

impl From<CaseLogRow> for CaseLogDto {
    fn from(r: CaseLogRow) -> Self {
        let log_date = fmt_datetime(&r.log_date);
        let date = log_date
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            id: r.id,
            report_id: r.report_id,
            officer_id: r.officer_id,
            action: r.action,
            notes: r.notes,
            log_date,
            status: r.status,
            officer_name: r.officer_name,
            officer_email: r.officer_email,
            date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub victim_id: i64,
    pub crime_type: String,
    pub description: String,
    pub date_occurred: NaiveDate,
    pub date_submitted: DateTime<Utc>,
    pub location: String,
    pub status: String,
    pub priority: String,
    pub assigned_officer_id: Option<i64>,
    pub assignment_date: Option<DateTime<Utc>>,
    pub victim_name: String,
    pub assigned_officer_name: Option<String>,
    pub evidence_count: i64,
}

impl From<ReportRow> for crate::features::reports::dtos::ReportDto {
    fn from(r: ReportRow) -> Self {
        Self {
            id: r.id,
            victim_id: r.victim_id,
            crime_type: r.crime_type,
            description: r.description,
            date_occurred: fmt_date(&r.date_occurred),
            date_submitted: fmt_datetime(&r.date_submitted),
            location: r.location,
            status: r.status,
            priority: r.priority,
            assigned_officer_id: r.assigned_officer_id,
            assignment_date: r.assignment_date.as_ref().map(fmt_datetime),
            victim_name: r.victim_name,
            assigned_officer_name: r.assigned_officer_name,
            evidence_count: r.evidence_count,
        }
    }
}
