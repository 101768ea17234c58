use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::core::middleware::client_ip;
use crate::features::auth::dtos::{
    validate_signup, LoginDto, LoginResponseDto, SignupDto, SignupResponseDto,
};
use crate::features::auth::routes::AuthState;
use crate::features::auth::session;

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupDto,
    responses(
        (status = 200, description = "Account created", body = SignupResponseDto),
        (status = 400, description = "Validation failed or user already exists")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AuthState>,
    headers: HeaderMap,
    AppJson(dto): AppJson<SignupDto>,
) -> Result<Json<SignupResponseDto>> {
    let data = validate_signup(&dto)?;
    let email = data.email.clone();
    let role = state.service.signup(data).await?;

    state
        .audit
        .log_by_email(
            &email,
            "User Created",
            &format!("New {} account created", role),
            &client_ip(&headers),
        )
        .await;

    Ok(Json(SignupResponseDto {
        message: "Signup successful".to_string(),
        role: role.to_string(),
    }))
}

/// Authenticate and open a session
///
/// On success the session token is returned in an HttpOnly cookie.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    headers: HeaderMap,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<impl IntoResponse> {
    let email = dto.email.unwrap_or_default();
    let password = dto.password.unwrap_or_default();

    let outcome = state.service.login(&email, &password).await?;

    state
        .audit
        .log(
            Some(outcome.user_id),
            "User Login",
            &format!("Login successful for {}", outcome.role),
            &client_ip(&headers),
        )
        .await;

    let cookie = session::build_session_cookie(outcome.token);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponseDto {
            message: "Login successful".to_string(),
            role: outcome.role.to_string(),
            name: outcome.name,
        }),
    ))
}
