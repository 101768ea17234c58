use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::auth::services::password;
use crate::features::users::dtos::{
    ChangePasswordDto, ProfileDto, ProfileStatsDto, UpdateProfileDto,
};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    nid: Option<String>,
    badge_number: Option<String>,
    department: Option<String>,
    specialization: Option<String>,
    admin_code: Option<String>,
    position: Option<String>,
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_reports: Option<i64>,
    active_cases: Option<i64>,
    completed_cases: Option<i64>,
    total_evidence: Option<i64>,
}

impl From<StatsRow> for ProfileStatsDto {
    fn from(r: StatsRow) -> Self {
        Self {
            total_reports: r.total_reports.unwrap_or(0),
            active_cases: r.active_cases.unwrap_or(0),
            completed_cases: r.completed_cases.unwrap_or(0),
            total_evidence: r.total_evidence.unwrap_or(0),
        }
    }
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<ProfileDto> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT u.id, u.name, u.email, u.role, u.phone, u.created_at, \
                    v.nid, o.badge_number, o.department, o.specialization, \
                    a.admin_code, a.position \
             FROM users u \
             LEFT JOIN victims v ON u.id = v.user_id \
             LEFT JOIN officers o ON u.id = o.user_id \
             LEFT JOIN admins a ON u.id = a.user_id \
             WHERE u.id = $1",
        )
        .bind(user.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(shape_profile(row, user.role))
    }

    /// Apply a partial update to the account row and, for officers and
    /// admins, their profile row, then return the refreshed profile.
    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<ProfileDto> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1")
            .bind(user.user_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        sqlx::query(
            "UPDATE users SET name = COALESCE($1, name), phone = COALESCE($2, phone) \
             WHERE id = $3",
        )
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(user.user_id)
        .execute(&self.pool)
        .await?;

        match user.role {
            Role::Officer => {
                sqlx::query(
                    "UPDATE officers SET department = COALESCE($1, department), \
                     specialization = COALESCE($2, specialization) WHERE user_id = $3",
                )
                .bind(&dto.department)
                .bind(&dto.specialization)
                .bind(user.user_id)
                .execute(&self.pool)
                .await?;
            }
            Role::Admin => {
                if dto.position.is_some() {
                    sqlx::query("UPDATE admins SET position = $1 WHERE user_id = $2")
                        .bind(&dto.position)
                        .bind(user.user_id)
                        .execute(&self.pool)
                        .await?;
                }
            }
            Role::Victim => {}
        }

        self.get_profile(user).await
    }

    pub async fn change_password(
        &self,
        user: &AuthenticatedUser,
        dto: ChangePasswordDto,
    ) -> Result<()> {
        let (current, new, confirm) = match (
            dto.current_password.as_deref(),
            dto.new_password.as_deref(),
            dto.confirm_password.as_deref(),
        ) {
            (Some(c), Some(n), Some(f)) if !c.is_empty() && !n.is_empty() && !f.is_empty() => {
                (c, n, f)
            }
            _ => return Err(AppError::BadRequest("All fields are required".to_string())),
        };

        if new != confirm {
            return Err(AppError::BadRequest(
                "New passwords do not match".to_string(),
            ));
        }

        let stored_hash =
            sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
                .bind(user.user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !password::verify_password(current, &stored_hash) {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = password::hash_password(new)?;
        sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(&new_hash)
            .bind(user.user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Role-scoped counters: victims see their own reports, officers their
    /// assigned cases, admins the whole system.
    pub async fn stats(&self, user: &AuthenticatedUser) -> Result<ProfileStatsDto> {
        let row = match user.role {
            Role::Victim => {
                sqlx::query_as::<_, StatsRow>(
                    "SELECT COUNT(*) AS total_reports, \
                            SUM(CASE WHEN status <> 'Closed' THEN 1 ELSE 0 END) AS active_cases, \
                            SUM(CASE WHEN status = 'Closed' THEN 1 ELSE 0 END) AS completed_cases, \
                            (SELECT COUNT(*) FROM evidence e WHERE e.report_id IN \
                                (SELECT id FROM reports WHERE victim_id = $1)) AS total_evidence \
                     FROM reports WHERE victim_id = $1",
                )
                .bind(user.user_id)
                .fetch_one(&self.pool)
                .await?
            }
            Role::Officer => {
                sqlx::query_as::<_, StatsRow>(
                    "SELECT COUNT(*) AS total_reports, \
                            SUM(CASE WHEN status <> 'Closed' THEN 1 ELSE 0 END) AS active_cases, \
                            SUM(CASE WHEN status = 'Closed' THEN 1 ELSE 0 END) AS completed_cases, \
                            (SELECT COUNT(*) FROM evidence e WHERE e.report_id IN \
                                (SELECT id FROM reports WHERE assigned_officer_id = $1)) AS total_evidence \
                     FROM reports WHERE assigned_officer_id = $1",
                )
                .bind(user.user_id)
                .fetch_one(&self.pool)
                .await?
            }
            Role::Admin => {
                sqlx::query_as::<_, StatsRow>(
                    "SELECT COUNT(*) AS total_reports, \
                            SUM(CASE WHEN status <> 'Closed' THEN 1 ELSE 0 END) AS active_cases, \
                            SUM(CASE WHEN status = 'Closed' THEN 1 ELSE 0 END) AS completed_cases, \
                            (SELECT COUNT(*) FROM evidence) AS total_evidence \
                     FROM reports",
                )
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(row.into())
    }
}

fn shape_profile(row: ProfileRow, role: Role) -> ProfileDto {
    let mut profile = ProfileDto {
        id: row.id,
        name: row.name,
        email: row.email,
        role: row.role,
        phone: row.phone.unwrap_or_default(),
        join_date: row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        nid: None,
        badge: None,
        department: None,
        specialization: None,
        admin_code: None,
        position: None,
    };

    match role {
        Role::Victim => {
            profile.nid = Some(row.nid.unwrap_or_default());
        }
        Role::Officer => {
            profile.badge = Some(row.badge_number.unwrap_or_default());
            profile.department = Some(row.department.unwrap_or_default());
            profile.specialization = Some(row.specialization.unwrap_or_default());
        }
        Role::Admin => {
            profile.admin_code = Some(row.admin_code.unwrap_or_default());
            profile.position = Some(row.position.unwrap_or_default());
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProfileRow {
        ProfileRow {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: "victim".to_string(),
            phone: None,
            created_at: Utc::now(),
            nid: Some("NID-1".to_string()),
            badge_number: Some("B-9".to_string()),
            department: Some("Cyber".to_string()),
            specialization: Some("Fraud".to_string()),
            admin_code: None,
            position: None,
        }
    }

    #[test]
    fn victim_profile_only_exposes_nid() {
        let profile = shape_profile(row(), Role::Victim);
        assert_eq!(profile.nid.as_deref(), Some("NID-1"));
        assert!(profile.badge.is_none());
        assert!(profile.admin_code.is_none());
        assert_eq!(profile.phone, "");
    }

    #[test]
    fn officer_profile_exposes_badge_fields() {
        let profile = shape_profile(row(), Role::Officer);
        assert_eq!(profile.badge.as_deref(), Some("B-9"));
        assert_eq!(profile.department.as_deref(), Some("Cyber"));
        assert!(profile.nid.is_none());
    }

    #[test]
    fn missing_admin_fields_default_to_empty() {
        let profile = shape_profile(row(), Role::Admin);
        assert_eq!(profile.admin_code.as_deref(), Some(""));
        assert_eq!(profile.position.as_deref(), Some(""));
    }
}
