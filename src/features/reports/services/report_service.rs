use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportDetailsDto, ReportDto};
use crate::features::reports::models::{CaseLogRow, EvidenceRow, ReportRow};
use crate::modules::storage::EvidenceStore;
use crate::shared::multipart::{MultipartForm, UploadedFile};
use crate::shared::types::{fmt_date, fmt_datetime, CaseLogDto, EvidenceDto};

/// A validated report submission.
#[derive(Debug)]
pub struct NewReport {
    pub crime_type: String,
    pub description: String,
    pub date_occurred: NaiveDate,
    pub location: String,
}

impl NewReport {
    /// Pull the report fields out of the multipart form. Every field is
    /// mandatory.
    pub fn from_form(form: &MultipartForm) -> Result<Self> {
        let (crime_type, description, date, location) = match (
            form.field("crime_type"),
            form.field("description"),
            form.field("date"),
            form.field("location"),
        ) {
            (Some(c), Some(d), Some(date), Some(l)) => (c, d, date, l),
            _ => return Err(AppError::BadRequest("All fields are required".to_string())),
        };

        let date_occurred = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))?;

        Ok(Self {
            crime_type: crime_type.to_string(),
            description: description.to_string(),
            date_occurred,
            location: location.to_string(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReportDetailsRow {
    id: i64,
    victim_id: i64,
    crime_type: String,
    description: String,
    date_occurred: NaiveDate,
    date_submitted: DateTime<Utc>,
    location: String,
    status: String,
    priority: String,
    assigned_officer_id: Option<i64>,
    assignment_date: Option<DateTime<Utc>>,
    victim_name: String,
    assigned_officer_name: Option<String>,
    assigned_officer_email: Option<String>,
    badge_number: Option<String>,
    specialization: Option<String>,
}

pub struct ReportService {
    pool: PgPool,
    store: Arc<EvidenceStore>,
}

impl ReportService {
    pub fn new(pool: PgPool, store: Arc<EvidenceStore>) -> Self {
        Self { pool, store }
    }

    /// File a new report and persist any attached evidence in the same
    /// transaction. Returns the report id and the number of stored files.
    pub async fn submit(
        &self,
        victim_id: i64,
        report: NewReport,
        files: &[UploadedFile],
    ) -> Result<(i64, usize)> {
        let mut tx = self.pool.begin().await?;

        let report_id: i64 = sqlx::query_scalar(
            "INSERT INTO reports (victim_id, crime_type, description, date_occurred, location) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(victim_id)
        .bind(&report.crime_type)
        .bind(&report.description)
        .bind(report.date_occurred)
        .bind(&report.location)
        .fetch_one(&mut *tx)
        .await?;

        let mut stored = 0usize;
        for file in files {
            let saved = self
                .store
                .save(report_id, &file.original_name, &file.data)
                .await?;

            sqlx::query(
                "INSERT INTO evidence (report_id, filename, original_name, file_path, \
                 file_size, content_type, uploaded_by, description) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(report_id)
            .bind(&saved.filename)
            .bind(&file.original_name)
            .bind(saved.path.to_string_lossy().as_ref())
            .bind(saved.size)
            .bind(&file.content_type)
            .bind(victim_id)
            .bind("Evidence uploaded with report")
            .execute(&mut *tx)
            .await?;

            stored += 1;
        }

        tx.commit().await?;
        tracing::info!(report_id, evidence = stored, "Report submitted");

        Ok((report_id, stored))
    }

    pub async fn list(&self, victim_id: i64) -> Result<Vec<ReportDto>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            "SELECT r.id, r.victim_id, r.crime_type, r.description, r.date_occurred, \
                    r.date_submitted, r.location, r.status, r.priority, \
                    r.assigned_officer_id, r.assignment_date, \
                    u.name AS victim_name, o.name AS assigned_officer_name, \
                    (SELECT COUNT(*) FROM evidence e WHERE e.report_id = r.id) AS evidence_count \
             FROM reports r \
             JOIN users u ON r.victim_id = u.id \
             LEFT JOIN users o ON r.assigned_officer_id = o.id \
             WHERE r.victim_id = $1 \
             ORDER BY r.date_submitted DESC",
        )
        .bind(victim_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Full report view for its owner, including officer contact details and
    /// evidence. An id belonging to another victim reads as missing.
    pub async fn details(&self, victim_id: i64, report_id: i64) -> Result<ReportDetailsDto> {
        let row = sqlx::query_as::<_, ReportDetailsRow>(
            "SELECT r.id, r.victim_id, r.crime_type, r.description, r.date_occurred, \
                    r.date_submitted, r.location, r.status, r.priority, \
                    r.assigned_officer_id, r.assignment_date, \
                    u.name AS victim_name, \
                    o.name AS assigned_officer_name, o.email AS assigned_officer_email, \
                    off.badge_number, off.specialization \
             FROM reports r \
             JOIN users u ON r.victim_id = u.id \
             LEFT JOIN users o ON r.assigned_officer_id = o.id \
             LEFT JOIN officers off ON o.id = off.user_id \
             WHERE r.id = $1 AND r.victim_id = $2",
        )
        .bind(report_id)
        .bind(victim_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let evidence = self.evidence_for(report_id).await?;

        Ok(ReportDetailsDto {
            id: row.id,
            victim_id: row.victim_id,
            crime_type: row.crime_type,
            description: row.description,
            date_occurred: fmt_date(&row.date_occurred),
            date_submitted: fmt_datetime(&row.date_submitted),
            location: row.location,
            status: row.status,
            priority: row.priority,
            assigned_officer_id: row.assigned_officer_id,
            assignment_date: row.assignment_date.as_ref().map(fmt_datetime),
            victim_name: row.victim_name,
            assigned_officer_name: row.assigned_officer_name,
            assigned_officer_email: row.assigned_officer_email,
            badge_number: row.badge_number,
            specialization: row.specialization,
            evidence,
        })
    }

    /// Attach more evidence to an owned report and return the refreshed
    /// evidence list.
    pub async fn add_evidence(
        &self,
        victim_id: i64,
        report_id: i64,
        files: &[UploadedFile],
    ) -> Result<Vec<EvidenceDto>> {
        self.ensure_owned(victim_id, report_id, "Report not found")
            .await?;

        // Rows for one upload land together or not at all, as in submit().
        let mut tx = self.pool.begin().await?;

        for file in files {
            let saved = self
                .store
                .save(report_id, &file.original_name, &file.data)
                .await?;

            sqlx::query(
                "INSERT INTO evidence (report_id, filename, original_name, file_path, \
                 file_size, content_type, uploaded_by, description) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(report_id)
            .bind(&saved.filename)
            .bind(&file.original_name)
            .bind(saved.path.to_string_lossy().as_ref())
            .bind(saved.size)
            .bind(&file.content_type)
            .bind(victim_id)
            .bind("Additional evidence uploaded")
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.evidence_for(report_id).await
    }

    pub async fn logs(&self, victim_id: i64, report_id: i64) -> Result<Vec<CaseLogDto>> {
        self.ensure_owned(victim_id, report_id, "Report not found or not authorized")
            .await?;

        let rows = sqlx::query_as::<_, CaseLogRow>(
            "SELECT cl.id, cl.report_id, cl.officer_id, cl.action, cl.notes, cl.log_date, \
                    cl.status, u.name AS officer_name, u.email AS officer_email \
             FROM case_logs cl \
             LEFT JOIN users u ON cl.officer_id = u.id \
             WHERE cl.report_id = $1 \
             ORDER BY cl.log_date DESC",
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ensure_owned(&self, victim_id: i64, report_id: i64, missing: &str) -> Result<()> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM reports WHERE id = $1 AND victim_id = $2",
        )
        .bind(report_id)
        .bind(victim_id)
        .fetch_optional(&self.pool)
        .await?;

        if found.is_none() {
            return Err(AppError::NotFound(missing.to_string()));
        }
        Ok(())
    }

    async fn evidence_for(&self, report_id: i64) -> Result<Vec<EvidenceDto>> {
        let rows = sqlx::query_as::<_, EvidenceRow>(
            "SELECT id, filename, original_name, content_type, file_size, description, \
                    upload_date \
             FROM evidence WHERE report_id = $1 \
             ORDER BY upload_date DESC",
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(fields: &[(&str, &str)]) -> MultipartForm {
        let mut form = MultipartForm::default();
        for (name, value) in fields {
            form.fields.insert(name.to_string(), value.to_string());
        }
        form
    }

    #[test]
    fn new_report_requires_every_field() {
        let form = form_with(&[
            ("crime_type", "Phishing"),
            ("description", "Fake bank portal"),
            ("date", "2026-01-15"),
        ]);
        let err = NewReport::from_form(&form).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "All fields are required"));
    }

    #[test]
    fn new_report_rejects_blank_fields() {
        let form = form_with(&[
            ("crime_type", "Phishing"),
            ("description", ""),
            ("date", "2026-01-15"),
            ("location", "Online"),
        ]);
        assert!(NewReport::from_form(&form).is_err());
    }

    #[test]
    fn new_report_parses_date() {
        let form = form_with(&[
            ("crime_type", "Phishing"),
            ("description", "Fake bank portal"),
            ("date", "2026-01-15"),
            ("location", "Online"),
        ]);
        let report = NewReport::from_form(&form).unwrap();
        assert_eq!(report.date_occurred, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn new_report_rejects_bad_date() {
        let form = form_with(&[
            ("crime_type", "Phishing"),
            ("description", "Fake bank portal"),
            ("date", "15/01/2026"),
            ("location", "Online"),
        ]);
        let err = NewReport::from_form(&form).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid date format"));
    }
}
