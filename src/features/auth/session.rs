//! Server-side session store.
//!
//! Sessions are rows in the `sessions` table keyed by an opaque UUID carried
//! in an HttpOnly cookie. A session holds exactly the identity the handlers
//! need (`user_id`, `email`, `role`); there is no expiry or refresh logic.

use axum::http::{header, HeaderMap};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::{AuthenticatedUser, Role};

pub const SESSION_COOKIE: &str = "session";

/// Pull the session token out of the `Cookie` header, if present and
/// well-formed.
pub fn cookie_token(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// `Set-Cookie` value for a freshly created session.
pub fn build_session_cookie(token: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a session row for a logged-in user and return its token.
    pub async fn create(&self, user_id: i64, email: &str, role: Role) -> Result<Uuid> {
        let token = Uuid::new_v4();
        sqlx::query("INSERT INTO sessions (token, user_id, email, role) VALUES ($1, $2, $3, $4)")
            .bind(token)
            .bind(user_id)
            .bind(email)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(token)
    }

    /// Resolve a token to its identity. Returns `None` for unknown tokens and
    /// for rows whose role string no longer parses.
    pub async fn resolve(&self, token: Uuid) -> Result<Option<AuthenticatedUser>> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT user_id, email, role FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(user_id, email, role)| {
            Role::parse(&role).map(|role| AuthenticatedUser {
                user_id,
                email,
                role,
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn token_is_parsed_from_cookie_header() {
        let token = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("session={}", token));
        assert_eq!(cookie_token(&headers), Some(token));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let token = Uuid::new_v4();
        let headers =
            headers_with_cookie(&format!("theme=dark; session={} ; lang=en", token));
        assert_eq!(cookie_token(&headers), Some(token));
    }

    #[test]
    fn missing_or_malformed_cookie_yields_none() {
        assert_eq!(cookie_token(&HeaderMap::new()), None);
        assert_eq!(cookie_token(&headers_with_cookie("theme=dark")), None);
        assert_eq!(
            cookie_token(&headers_with_cookie("session=not-a-uuid")),
            None
        );
    }

    #[test]
    fn session_token_binds_as_a_postgres_value() {
        fn assert_bindable<T>()
        where
            T: sqlx::Type<sqlx::Postgres> + for<'q> sqlx::Encode<'q, sqlx::Postgres>,
        {
        }
        assert_bindable::<Uuid>();
    }

    #[test]
    fn set_cookie_value_is_http_only() {
        let token = Uuid::new_v4();
        let cookie = build_session_cookie(token);
        assert!(cookie.starts_with(&format!("session={}", token)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
