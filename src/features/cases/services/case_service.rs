use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::cases::dtos::{
    AssignedCasesQuery, CaseDto, CaseEvidenceDto, WorkloadDto,
};
use crate::features::reports::models::{CaseLogRow, EvidenceRow};
use crate::modules::storage::EvidenceStore;
use crate::shared::multipart::UploadedFile;
use crate::shared::types::{fmt_date, fmt_datetime, CaseLogDto, EvidenceDto};

#[derive(sqlx::FromRow)]
struct CaseRow {
    id: i64,
    crime_type: String,
    description: String,
    date_occurred: NaiveDate,
    date_submitted: DateTime<Utc>,
    location: String,
    status: String,
    priority: String,
    victim_name: String,
    victim_phone: String,
}

impl From<CaseRow> for CaseDto {
    fn from(r: CaseRow) -> Self {
        Self {
            id: r.id,
            crime_type: r.crime_type,
            description: r.description,
            date_occurred: fmt_date(&r.date_occurred),
            date_submitted: fmt_datetime(&r.date_submitted),
            location: r.location,
            status: r.status,
            priority: r.priority,
            victim_name: r.victim_name,
            victim_phone: r.victim_phone,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CaseEvidenceRow {
    id: i64,
    case_id: i64,
    filename: String,
    original_name: String,
    content_type: String,
    file_size: i64,
    upload_date: DateTime<Utc>,
    crime_type: String,
    status: String,
    victim_name: String,
}

#[derive(sqlx::FromRow)]
struct WorkloadRow {
    total_cases: i64,
    open_cases: i64,
    in_progress: i64,
    closed_cases: i64,
}

/// Map the client-facing sort labels onto fixed ORDER BY clauses. Anything
/// unknown falls back to newest-first.
fn order_clause(sort_by: &str) -> &'static str {
    match sort_by {
        "Victim Name" => " ORDER BY u.name",
        "Case ID" => " ORDER BY r.id",
        "Crime Type" => " ORDER BY r.crime_type",
        "Status" => " ORDER BY r.status",
        _ => " ORDER BY r.date_submitted DESC",
    }
}

pub struct CaseService {
    pool: PgPool,
    store: Arc<EvidenceStore>,
}

impl CaseService {
    pub fn new(pool: PgPool, store: Arc<EvidenceStore>) -> Self {
        Self { pool, store }
    }

    /// Cases assigned to the officer, with optional status, type and search
    /// filters.
    pub async fn assigned_cases(
        &self,
        officer_id: i64,
        query: &AssignedCasesQuery,
    ) -> Result<Vec<CaseDto>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT r.id, r.crime_type, r.description, r.date_occurred, r.date_submitted, \
             r.location, r.status, r.priority, \
             u.name AS victim_name, u.phone AS victim_phone \
             FROM reports r \
             JOIN users u ON r.victim_id = u.id \
             WHERE r.assigned_officer_id = ",
        );
        qb.push_bind(officer_id);

        if query.status != "All Status" {
            qb.push(" AND r.status = ").push_bind(&query.status);
        }
        if query.crime_type != "All Types" {
            qb.push(" AND r.crime_type = ").push_bind(&query.crime_type);
        }
        if !query.search.is_empty() {
            let pattern = format!("%{}%", query.search);
            qb.push(" AND (u.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.crime_type ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(order_clause(&query.sort_by));

        let rows: Vec<CaseRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn case_details(&self, officer_id: i64, case_id: i64) -> Result<CaseDto> {
        let row = sqlx::query_as::<_, CaseRow>(
            "SELECT r.id, r.crime_type, r.description, r.date_occurred, r.date_submitted, \
                    r.location, r.status, r.priority, \
                    u.name AS victim_name, u.phone AS victim_phone \
             FROM reports r \
             JOIN users u ON r.victim_id = u.id \
             WHERE r.id = $1 AND r.assigned_officer_id = $2",
        )
        .bind(case_id)
        .bind(officer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Case not found".to_string()))?;

        Ok(row.into())
    }

    pub async fn evidence(&self, officer_id: i64, case_id: i64) -> Result<Vec<EvidenceDto>> {
        self.ensure_assigned(officer_id, case_id).await?;

        let rows = sqlx::query_as::<_, EvidenceRow>(
            "SELECT id, filename, original_name, content_type, file_size, description, \
                    upload_date \
             FROM evidence WHERE report_id = $1 \
             ORDER BY upload_date DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Store officer-supplied evidence on an assigned case and return the
    /// refreshed evidence list.
    pub async fn add_evidence(
        &self,
        officer_id: i64,
        case_id: i64,
        files: &[UploadedFile],
    ) -> Result<Vec<EvidenceDto>> {
        self.ensure_assigned(officer_id, case_id).await?;

        if files.is_empty() {
            return Err(AppError::BadRequest(
                "No valid files were uploaded".to_string(),
            ));
        }

        // Rows for one upload land together or not at all.
        let mut tx = self.pool.begin().await?;

        for file in files {
            let saved = self
                .store
                .save(case_id, &file.original_name, &file.data)
                .await?;

            sqlx::query(
                "INSERT INTO evidence (report_id, filename, original_name, file_path, \
                 file_size, content_type, uploaded_by, description) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(case_id)
            .bind(&saved.filename)
            .bind(&file.original_name)
            .bind(saved.path.to_string_lossy().as_ref())
            .bind(saved.size)
            .bind(&file.content_type)
            .bind(officer_id)
            .bind("Evidence uploaded by officer")
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let rows = sqlx::query_as::<_, EvidenceRow>(
            "SELECT id, filename, original_name, content_type, file_size, description, \
                    upload_date \
             FROM evidence WHERE report_id = $1 \
             ORDER BY upload_date DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn add_log(
        &self,
        officer_id: i64,
        case_id: i64,
        action: &str,
        notes: &str,
    ) -> Result<()> {
        self.ensure_assigned(officer_id, case_id).await?;

        sqlx::query(
            "INSERT INTO case_logs (report_id, officer_id, action, notes) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(case_id)
        .bind(officer_id)
        .bind(action)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn logs(&self, officer_id: i64, case_id: i64) -> Result<Vec<CaseLogDto>> {
        self.ensure_assigned(officer_id, case_id).await?;

        let rows = sqlx::query_as::<_, CaseLogRow>(
            "SELECT cl.id, cl.report_id, cl.officer_id, cl.action, cl.notes, cl.log_date, \
                    cl.status, u.name AS officer_name, u.email AS officer_email \
             FROM case_logs cl \
             LEFT JOIN users u ON cl.officer_id = u.id \
             WHERE cl.report_id = $1 \
             ORDER BY cl.log_date DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Move a case to a new status through the stored routine, which also
    /// appends the matching case log entry.
    pub async fn update_status(
        &self,
        officer_id: i64,
        case_id: i64,
        status: &str,
    ) -> Result<()> {
        let affected: i32 =
            sqlx::query_scalar("SELECT update_report_status($1, $2, $3)")
                .bind(case_id)
                .bind(status)
                .bind(officer_id)
                .fetch_one(&self.pool)
                .await?;

        if affected == 0 {
            return Err(AppError::NotFound(
                "Case not found or not assigned to you".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn workload(&self, officer_id: i64) -> Result<WorkloadDto> {
        let row = sqlx::query_as::<_, WorkloadRow>(
            "SELECT total_cases, open_cases, in_progress, closed_cases \
             FROM get_officer_workload($1)",
        )
        .bind(officer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(WorkloadDto {
            total_cases: row.total_cases,
            open_cases: row.open_cases,
            in_progress: row.in_progress,
            closed_cases: row.closed_cases,
        })
    }

    /// Every evidence item across the officer's assigned cases, newest first.
    pub async fn all_evidence(&self, officer_id: i64) -> Result<Vec<CaseEvidenceDto>> {
        let rows = sqlx::query_as::<_, CaseEvidenceRow>(
            "SELECT e.id, e.report_id AS case_id, e.filename, e.original_name, \
                    e.content_type, e.file_size, e.upload_date, \
                    r.crime_type, r.status, u.name AS victim_name \
             FROM evidence e \
             JOIN reports r ON e.report_id = r.id \
             JOIN users u ON r.victim_id = u.id \
             WHERE r.assigned_officer_id = $1 \
             ORDER BY e.upload_date DESC",
        )
        .bind(officer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CaseEvidenceDto {
                id: r.id,
                case_id: r.case_id,
                filename: r.filename,
                original_name: r.original_name,
                content_type: r.content_type,
                file_size: r.file_size,
                upload_date: fmt_datetime(&r.upload_date),
                crime_type: r.crime_type,
                status: r.status,
                victim_name: r.victim_name,
            })
            .collect())
    }

    async fn ensure_assigned(&self, officer_id: i64, case_id: i64) -> Result<()> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM reports WHERE id = $1 AND assigned_officer_id = $2",
        )
        .bind(case_id)
        .bind(officer_id)
        .fetch_optional(&self.pool)
        .await?;

        if found.is_none() {
            return Err(AppError::NotFound(
                "Case not found or not assigned to you".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sort_labels_map_to_columns() {
        assert_eq!(order_clause("Victim Name"), " ORDER BY u.name");
        assert_eq!(order_clause("Case ID"), " ORDER BY r.id");
        assert_eq!(order_clause("Crime Type"), " ORDER BY r.crime_type");
        assert_eq!(order_clause("Status"), " ORDER BY r.status");
    }

    #[test]
    fn unknown_sort_labels_fall_back_to_date() {
        assert_eq!(order_clause("Date Reported"), " ORDER BY r.date_submitted DESC");
        assert_eq!(
            order_clause("id; DROP TABLE reports"),
            " ORDER BY r.date_submitted DESC"
        );
    }
}
