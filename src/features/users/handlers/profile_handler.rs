use axum::{extract::State, http::HeaderMap, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::core::middleware::client_ip;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    ChangePasswordDto, MessageDto, ProfileResponseDto, ProfileStatsResponseDto, UpdateProfileDto,
};
use crate::features::users::routes::UsersState;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile data", body = ProfileResponseDto),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    tag = "profile"
)]
pub async fn get_profile(
    State(state): State<UsersState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileResponseDto>> {
    let profile = state.service.get_profile(&user).await?;
    Ok(Json(ProfileResponseDto { profile }))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponseDto),
        (status = 401, description = "Not authenticated")
    ),
    tag = "profile"
)]
pub async fn update_profile(
    State(state): State<UsersState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ProfileResponseDto>> {
    let profile = state.service.update_profile(&user, dto).await?;

    state
        .audit
        .log(
            Some(user.user_id),
            "Profile Updated",
            "User updated their profile information",
            &client_ip(&headers),
        )
        .await;

    Ok(Json(ProfileResponseDto { profile }))
}

/// Change the authenticated user's password
#[utoipa::path(
    post,
    path = "/profile/change-password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Validation failed or wrong current password"),
        (status = 401, description = "Not authenticated")
    ),
    tag = "profile"
)]
pub async fn change_password(
    State(state): State<UsersState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<MessageDto>> {
    state.service.change_password(&user, dto).await?;

    state
        .audit
        .log(
            Some(user.user_id),
            "Password Changed",
            "User changed their password",
            &client_ip(&headers),
        )
        .await;

    Ok(Json(MessageDto {
        message: "Password changed successfully".to_string(),
    }))
}

/// Role-scoped case counters for the profile page
#[utoipa::path(
    get,
    path = "/profile/stats",
    responses(
        (status = 200, description = "Counters", body = ProfileStatsResponseDto),
        (status = 401, description = "Not authenticated")
    ),
    tag = "profile"
)]
pub async fn profile_stats(
    State(state): State<UsersState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileStatsResponseDto>> {
    let stats = state.service.stats(&user).await?;
    Ok(Json(ProfileStatsResponseDto { stats }))
}
