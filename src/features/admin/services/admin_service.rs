use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    ActiveCaseDto, AdminReportDto, AdminUserDto, AnalyticsResponseDto, AuditLogEntryDto,
    AuditTrailEntryDto, AvailableOfficerDto, EvidenceSummaryDto, OfficerCaseloadDto,
    OfficerPerformanceDto, ReportStatsDto, UpdateUserDto, UserCountsDto, UserStatsDto,
};
use crate::shared::constants::{ANALYTICS_TOP_N, AUDIT_TRAIL_LIMIT};
use crate::shared::types::{fmt_date, fmt_datetime};

#[derive(sqlx::FromRow)]
struct UserStatsRow {
    total_users: i64,
    victims: i64,
    officers: i64,
    admins: i64,
}

#[derive(sqlx::FromRow)]
struct ReportStatsRow {
    total_reports: i64,
    open_cases: i64,
    in_progress: i64,
    closed_cases: i64,
    unassigned_cases: i64,
}

#[derive(sqlx::FromRow)]
struct ActiveCaseRow {
    id: i64,
    crime_type: String,
    description: String,
    date_occurred: NaiveDate,
    date_submitted: DateTime<Utc>,
    location: String,
    status: String,
    priority: String,
    victim_name: String,
    assigned_officer_name: Option<String>,
}

impl From<ActiveCaseRow> for ActiveCaseDto {
    fn from(r: ActiveCaseRow) -> Self {
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
            assigned_officer_name: r.assigned_officer_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OfficerPerformanceRow {
    officer_id: i64,
    officer_name: String,
    department: String,
    total_cases: i64,
    closed_cases: i64,
    avg_response_time: Option<f64>,
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: i64,
    action: String,
    details: String,
    status: String,
    ip_address: String,
    timestamp: DateTime<Utc>,
    user_name: String,
    user_email: Option<String>,
    user_role: String,
}

#[derive(sqlx::FromRow)]
struct AdminReportRow {
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
    assigned_officer_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct AdminUserRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    specialization: Option<String>,
    department: Option<String>,
    badge_number: Option<String>,
}

fn title_case_role(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assign an officer to a report through the stored routine, which stamps
    /// the assignment and opens the case log.
    pub async fn assign_officer(
        &self,
        report_id: i64,
        officer_id: i64,
        note: &str,
    ) -> Result<()> {
        let affected: i32 = sqlx::query_scalar("SELECT assign_officer_to_report($1, $2, $3)")
            .bind(report_id)
            .bind(officer_id)
            .bind(note)
            .fetch_one(&self.pool)
            .await?;

        if affected == 0 {
            return Err(AppError::NotFound("Report not found".to_string()));
        }

        tracing::info!(report_id, officer_id, "Officer assigned to report");
        Ok(())
    }

    pub async fn analytics(&self) -> Result<AnalyticsResponseDto> {
        let user_stats = self.user_stats().await?;
        let report_stats = self.report_stats().await?;

        let caseload = sqlx::query_as::<_, OfficerPerformanceRow>(
            "SELECT officer_id, officer_name, department, total_cases, closed_cases, \
                    avg_response_time \
             FROM officer_performance_view \
             ORDER BY total_cases DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let active = sqlx::query_as::<_, ActiveCaseRow>(
            "SELECT * FROM active_cases_view LIMIT $1",
        )
        .bind(ANALYTICS_TOP_N)
        .fetch_all(&self.pool)
        .await?;

        let summary = sqlx::query_as::<_, EvidenceSummaryRow>(
            "SELECT report_id, crime_type, evidence_count, total_size \
             FROM evidence_summary_view \
             ORDER BY evidence_count DESC \
             LIMIT $1",
        )
        .bind(ANALYTICS_TOP_N)
        .fetch_all(&self.pool)
        .await?;

        Ok(AnalyticsResponseDto {
            user_stats,
            report_stats,
            reports_per_officer: caseload
                .into_iter()
                .map(|r| OfficerCaseloadDto {
                    officer_name: r.officer_name,
                    total_cases: r.total_cases,
                    closed_cases: r.closed_cases,
                    avg_response_time: r.avg_response_time,
                })
                .collect(),
            active_cases: active.into_iter().map(Into::into).collect(),
            evidence_summary: summary
                .into_iter()
                .map(|r| EvidenceSummaryDto {
                    report_id: r.report_id,
                    crime_type: r.crime_type,
                    evidence_count: r.evidence_count,
                    total_size: r.total_size,
                })
                .collect(),
        })
    }

    pub async fn active_cases(&self) -> Result<Vec<ActiveCaseDto>> {
        let rows = sqlx::query_as::<_, ActiveCaseRow>("SELECT * FROM active_cases_view")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn officer_performance(&self) -> Result<Vec<OfficerPerformanceDto>> {
        let rows = sqlx::query_as::<_, OfficerPerformanceRow>(
            "SELECT * FROM officer_performance_view",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| OfficerPerformanceDto {
                officer_id: r.officer_id,
                officer_name: r.officer_name,
                department: r.department,
                total_cases: r.total_cases,
                closed_cases: r.closed_cases,
                avg_response_time: r.avg_response_time,
            })
            .collect())
    }

    pub async fn audit_trail(&self) -> Result<Vec<AuditTrailEntryDto>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT * FROM audit_trail_view ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(AUDIT_TRAIL_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AuditTrailEntryDto {
                id: r.id,
                action: r.action,
                details: r.details,
                status: r.status,
                ip_address: r.ip_address,
                timestamp: fmt_datetime(&r.timestamp),
                user_name: r.user_name,
                user_email: r.user_email,
                user_role: r.user_role,
            })
            .collect())
    }

    pub async fn audit_logs(&self) -> Result<Vec<AuditLogEntryDto>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT al.id, al.action, al.details, al.status, al.ip_address, al.timestamp, \
                    COALESCE(u.name, 'Unknown User') AS user_name, \
                    u.email AS user_email, \
                    COALESCE(u.role, 'Unknown Role') AS user_role \
             FROM audit_logs al \
             LEFT JOIN users u ON al.user_id = u.id \
             ORDER BY al.timestamp DESC \
             LIMIT $1",
        )
        .bind(AUDIT_TRAIL_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AuditLogEntryDto {
                id: r.id,
                action: r.action,
                details: r.details,
                status: r.status,
                ip_address: r.ip_address,
                timestamp: fmt_datetime(&r.timestamp),
                user: r.user_name,
                user_email: r.user_email,
                role: r.user_role,
            })
            .collect())
    }

    pub async fn reset_audit_logs(&self) -> Result<()> {
        sqlx::query("DELETE FROM audit_logs")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn all_reports(&self) -> Result<Vec<AdminReportDto>> {
        let rows = sqlx::query_as::<_, AdminReportRow>(
            "SELECT r.id, r.crime_type, r.description, r.date_occurred, r.date_submitted, \
                    r.location, r.status, r.priority, \
                    u.name AS victim_name, u.phone AS victim_phone, \
                    o.name AS assigned_officer_name \
             FROM reports r \
             JOIN users u ON r.victim_id = u.id \
             LEFT JOIN users o ON r.assigned_officer_id = o.id \
             ORDER BY r.date_submitted DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AdminReportDto {
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
                assigned_officer_name: r.assigned_officer_name,
            })
            .collect())
    }

    pub async fn available_officers(&self) -> Result<Vec<AvailableOfficerDto>> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: i64,
            name: String,
            email: String,
            badge_number: Option<String>,
            department: Option<String>,
            specialization: Option<String>,
            rank_name: Option<String>,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT u.id, u.name, u.email, \
                    o.badge_number, o.department, o.specialization, o.rank_name \
             FROM users u \
             JOIN officers o ON u.id = o.user_id \
             WHERE u.role = 'officer' AND u.is_active = TRUE \
             ORDER BY u.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AvailableOfficerDto {
                id: r.id,
                name: r.name,
                email: r.email,
                specialization: r.specialization.unwrap_or_else(|| "General".to_string()),
                department: r.department.unwrap_or_else(|| "Cyber Crime".to_string()),
                badge: r.badge_number.unwrap_or_else(|| "N/A".to_string()),
                rank: r.rank_name.unwrap_or_else(|| "Officer".to_string()),
            })
            .collect())
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUserDto>> {
        let rows = sqlx::query_as::<_, AdminUserRow>(
            "SELECT u.id, u.name, u.email, u.phone, u.role, u.created_at, \
                    o.specialization, o.department, o.badge_number \
             FROM users u \
             LEFT JOIN officers o ON u.id = o.user_id \
             WHERE u.is_active = TRUE \
             ORDER BY u.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AdminUserDto {
                id: r.id,
                name: r.name,
                email: r.email,
                phone: r.phone.filter(|p| !p.is_empty()).unwrap_or_else(|| "N/A".to_string()),
                role: title_case_role(&r.role),
                join_date: fmt_date(&r.created_at.date_naive()),
                specialization: r.specialization.unwrap_or_else(|| "General".to_string()),
                department: r.department.unwrap_or_else(|| "Cyber Crime".to_string()),
                badge: r.badge_number.unwrap_or_else(|| "N/A".to_string()),
            })
            .collect())
    }

    /// Partial update of a user. A role change is only accepted when the
    /// target role's profile row already exists for that user; profiles are
    /// never created here.
    pub async fn update_user(&self, user_id: i64, dto: UpdateUserDto) -> Result<()> {
        let current_role =
            sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let new_role = dto.role.as_deref().map(str::to_lowercase);

        if let Some(role) = new_role.as_deref() {
            if role != current_role {
                let table = match role {
                    "victim" => "victims",
                    "officer" => "officers",
                    "admin" => "admins",
                    _ => return Err(AppError::BadRequest("Invalid role".to_string())),
                };
                let query =
                    format!("SELECT user_id FROM {} WHERE user_id = $1", table);
                let has_profile = sqlx::query_scalar::<_, i64>(&query)
                    .bind(user_id)
                    .fetch_optional(&self.pool)
                    .await?;
                if has_profile.is_none() {
                    return Err(AppError::BadRequest(format!(
                        "User has no {} profile",
                        role
                    )));
                }
            }
        }

        sqlx::query(
            "UPDATE users SET name = COALESCE($1, name), phone = COALESCE($2, phone), \
             role = COALESCE($3, role) WHERE id = $4",
        )
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(&new_role)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if new_role.as_deref() == Some("officer") {
            sqlx::query(
                "UPDATE officers SET specialization = COALESCE($1, specialization), \
                 department = COALESCE($2, department) WHERE user_id = $3",
            )
            .bind(&dto.specialization)
            .bind(&dto.department)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Soft-delete: the row stays for audit joins but drops out of every
    /// active-user query. Returns the deleted user's name and email.
    pub async fn delete_user(&self, admin_id: i64, user_id: i64) -> Result<(String, String)> {
        if admin_id == user_id {
            return Err(AppError::BadRequest(
                "Cannot delete your own account".to_string(),
            ));
        }

        let target = sqlx::query_as::<_, (String, String)>(
            "SELECT name, email FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(target)
    }

    pub async fn user_counts(&self) -> Result<UserCountsDto> {
        let row = sqlx::query_as::<_, UserStatsRow>("SELECT * FROM get_user_stats()")
            .fetch_one(&self.pool)
            .await?;

        Ok(UserCountsDto {
            total: row.total_users,
            victims: row.victims,
            officers: row.officers,
            admins: row.admins,
        })
    }

    async fn user_stats(&self) -> Result<UserStatsDto> {
        let row = sqlx::query_as::<_, UserStatsRow>("SELECT * FROM get_user_stats()")
            .fetch_one(&self.pool)
            .await?;

        Ok(UserStatsDto {
            total_users: row.total_users,
            victims: row.victims,
            officers: row.officers,
            admins: row.admins,
        })
    }

    async fn report_stats(&self) -> Result<ReportStatsDto> {
        let row = sqlx::query_as::<_, ReportStatsRow>("SELECT * FROM get_report_stats()")
            .fetch_one(&self.pool)
            .await?;

        Ok(ReportStatsDto {
            total_reports: row.total_reports,
            open_cases: row.open_cases,
            in_progress: row.in_progress,
            closed_cases: row.closed_cases,
            unassigned_cases: row.unassigned_cases,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EvidenceSummaryRow {
    report_id: i64,
    crime_type: String,
    evidence_count: i64,
    total_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_are_title_cased() {
        assert_eq!(title_case_role("victim"), "Victim");
        assert_eq!(title_case_role("officer"), "Officer");
        assert_eq!(title_case_role("admin"), "Admin");
        assert_eq!(title_case_role(""), "");
    }
}
