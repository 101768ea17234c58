use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{is_unique_violation, AppError, Result};
use crate::features::auth::dtos::{RoleProfile, SignupData};
use crate::features::auth::model::Role;
use crate::features::auth::services::password;
use crate::features::auth::session::SessionService;

/// Outcome of a successful login: the session token to set and the fields
/// echoed back to the client.
pub struct LoginOutcome {
    pub user_id: i64,
    pub token: Uuid,
    pub role: Role,
    pub name: String,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: String,
}

pub struct AuthService {
    pool: PgPool,
    sessions: SessionService,
}

impl AuthService {
    pub fn new(pool: PgPool, sessions: SessionService) -> Self {
        Self { pool, sessions }
    }

    /// Create the account row and its role-specific profile row in one
    /// transaction. A duplicate email surfaces as a 400.
    pub async fn signup(&self, data: SignupData) -> Result<Role> {
        let role = data.profile.role();
        let password_hash = password::hash_password(&data.password)?;

        let mut tx = self.pool.begin().await?;

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password, phone, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&password_hash)
        .bind(&data.phone)
        .bind(role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest("User already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        match &data.profile {
            RoleProfile::Victim { nid } => {
                sqlx::query("INSERT INTO victims (user_id, nid) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(nid)
                    .execute(&mut *tx)
                    .await?;
            }
            RoleProfile::Officer {
                badge_number,
                department,
                specialization,
            } => {
                sqlx::query(
                    "INSERT INTO officers (user_id, badge_number, department, specialization) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(user_id)
                .bind(badge_number)
                .bind(department)
                .bind(specialization)
                .execute(&mut *tx)
                .await?;
            }
            RoleProfile::Admin {
                admin_code,
                position,
            } => {
                sqlx::query("INSERT INTO admins (user_id, admin_code, position) VALUES ($1, $2, $3)")
                    .bind(user_id)
                    .bind(admin_code)
                    .bind(position)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(user_id, role = %role, "New account registered");
        Ok(role)
    }

    /// Check credentials against active accounts and open a session. Unknown
    /// email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, candidate_password: &str) -> Result<LoginOutcome> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, name, email, password, role FROM users \
             WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !password::verify_password(candidate_password, &row.password) {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let role = Role::parse(&row.role)
            .ok_or_else(|| AppError::Internal("Account has an unknown role".to_string()))?;

        let token = self.sessions.create(row.id, &row.email, role).await?;

        Ok(LoginOutcome {
            user_id: row.id,
            token,
            role,
            name: row.name,
        })
    }
}
