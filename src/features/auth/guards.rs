//! Role-based authorization guards.
//!
//! Each guard extracts the authenticated user from request extensions and
//! checks for an exact role match. A missing session and a wrong role both
//! reject with 401 `{"error": "Unauthorized"}` — ownership of individual
//! resources is checked separately inside the services and answers 404 so
//! that existence is not leaked to other callers.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn session_user(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
}

/// Guard for victim-only routes.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireVictim(user): RequireVictim) { ... }
/// ```
pub struct RequireVictim(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireVictim
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)?;
        if !user.is_victim() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }
        Ok(RequireVictim(user))
    }
}

/// Guard for officer-only routes.
pub struct RequireOfficer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireOfficer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)?;
        if !user.is_officer() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }
        Ok(RequireOfficer(user))
    }
}

/// Guard for admin-only routes.
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)?;
        if !user.is_admin() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 7,
            email: "user@example.com".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn missing_session_is_rejected() {
        let mut parts = parts_with(None);
        assert!(RequireVictim::from_request_parts(&mut parts, &())
            .await
            .is_err());
        assert!(RequireOfficer::from_request_parts(&mut parts, &())
            .await
            .is_err());
        assert!(RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn wrong_role_is_rejected() {
        let mut parts = parts_with(Some(user(Role::Victim)));
        assert!(RequireOfficer::from_request_parts(&mut parts, &())
            .await
            .is_err());
        assert!(RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn exact_role_is_allowed() {
        let mut parts = parts_with(Some(user(Role::Officer)));
        let RequireOfficer(extracted) = RequireOfficer::from_request_parts(&mut parts, &())
            .await
            .expect("officer session should pass the officer guard");
        assert_eq!(extracted.user_id, 7);
    }

    #[tokio::test]
    async fn admin_does_not_satisfy_officer_guard() {
        // Exact equality only: no role hierarchy.
        let mut parts = parts_with(Some(user(Role::Admin)));
        assert!(RequireOfficer::from_request_parts(&mut parts, &())
            .await
            .is_err());
        assert!(RequireVictim::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }
}
