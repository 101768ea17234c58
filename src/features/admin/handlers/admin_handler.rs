use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::middleware::client_ip;
use crate::features::admin::dtos::{
    ActiveCasesResponseDto, AdminReportsResponseDto, AdminUsersResponseDto,
    AnalyticsResponseDto, AssignOfficerDto, AuditLogsResponseDto, AuditTrailResponseDto,
    AvailableOfficersResponseDto, OfficerPerformanceResponseDto, UpdateUserDto, UserCountsDto,
};
use crate::features::admin::routes::AdminState;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::MessageDto;

/// Assign an officer to a report
#[utoipa::path(
    post,
    path = "/admin/assign",
    request_body = AssignOfficerDto,
    responses(
        (status = 200, description = "Officer assigned", body = MessageDto),
        (status = 400, description = "Ids missing"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin"
)]
pub async fn assign_officer(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
    AppJson(dto): AppJson<AssignOfficerDto>,
) -> Result<Json<MessageDto>> {
    let (report_id, officer_id) = match (dto.report_id, dto.officer_id) {
        (Some(r), Some(o)) => (r, o),
        _ => {
            return Err(AppError::BadRequest(
                "Report ID and Officer ID are required".to_string(),
            ))
        }
    };

    state
        .service
        .assign_officer(report_id, officer_id, &dto.note)
        .await?;

    Ok(Json(MessageDto::new("Officer assigned successfully")))
}

/// System-wide analytics overview
#[utoipa::path(
    get,
    path = "/admin/analytics",
    responses(
        (status = 200, description = "Analytics bundle", body = AnalyticsResponseDto),
        (status = 401, description = "Not an admin session")
    ),
    tag = "admin"
)]
pub async fn analytics(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AnalyticsResponseDto>> {
    Ok(Json(state.service.analytics().await?))
}

/// Every case that is not yet closed
#[utoipa::path(
    get,
    path = "/admin/active_cases",
    responses(
        (status = 200, description = "Active cases", body = ActiveCasesResponseDto)
    ),
    tag = "admin"
)]
pub async fn active_cases(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<ActiveCasesResponseDto>> {
    let active_cases = state.service.active_cases().await?;
    Ok(Json(ActiveCasesResponseDto { active_cases }))
}

/// Caseload and response-time figures per officer
#[utoipa::path(
    get,
    path = "/admin/officer_performance",
    responses(
        (status = 200, description = "Performance rows", body = OfficerPerformanceResponseDto)
    ),
    tag = "admin"
)]
pub async fn officer_performance(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<OfficerPerformanceResponseDto>> {
    let officer_performance = state.service.officer_performance().await?;
    Ok(Json(OfficerPerformanceResponseDto { officer_performance }))
}

/// Recent audit trail entries
#[utoipa::path(
    get,
    path = "/admin/audit_trail",
    responses(
        (status = 200, description = "Audit trail", body = AuditTrailResponseDto)
    ),
    tag = "admin"
)]
pub async fn audit_trail(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AuditTrailResponseDto>> {
    let audit_trail = state.service.audit_trail().await?;
    Ok(Json(AuditTrailResponseDto { audit_trail }))
}

/// Recent audit log entries, legacy field names
#[utoipa::path(
    get,
    path = "/admin/audit_logs",
    responses(
        (status = 200, description = "Audit logs", body = AuditLogsResponseDto)
    ),
    tag = "admin"
)]
pub async fn audit_logs(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AuditLogsResponseDto>> {
    let logs = state.service.audit_logs().await?;
    Ok(Json(AuditLogsResponseDto { logs }))
}

/// Clear the audit log
#[utoipa::path(
    delete,
    path = "/admin/audit_logs/reset",
    responses(
        (status = 200, description = "Logs cleared", body = MessageDto)
    ),
    tag = "admin"
)]
pub async fn reset_audit_logs(
    State(state): State<AdminState>,
    RequireAdmin(user): RequireAdmin,
    headers: HeaderMap,
) -> Result<Json<MessageDto>> {
    state.service.reset_audit_logs().await?;

    state
        .audit
        .log(
            Some(user.user_id),
            "Audit Log Reset",
            "All audit logs have been cleared",
            &client_ip(&headers),
        )
        .await;

    Ok(Json(MessageDto::new("Audit logs reset successfully")))
}

/// Every report in the system
#[utoipa::path(
    get,
    path = "/admin/all_reports",
    responses(
        (status = 200, description = "All reports", body = AdminReportsResponseDto)
    ),
    tag = "admin"
)]
pub async fn all_reports(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AdminReportsResponseDto>> {
    let reports = state.service.all_reports().await?;
    Ok(Json(AdminReportsResponseDto { reports }))
}

/// Active officers available for assignment
#[utoipa::path(
    get,
    path = "/admin/available_officers",
    responses(
        (status = 200, description = "Officers", body = AvailableOfficersResponseDto)
    ),
    tag = "admin"
)]
pub async fn available_officers(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AvailableOfficersResponseDto>> {
    let officers = state.service.available_officers().await?;
    Ok(Json(AvailableOfficersResponseDto { officers }))
}

/// Every active user account
#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "Users", body = AdminUsersResponseDto)
    ),
    tag = "admin"
)]
pub async fn list_users(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<AdminUsersResponseDto>> {
    let users = state.service.list_users().await?;
    Ok(Json(AdminUsersResponseDto { users }))
}

/// Update a user account
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = MessageDto),
        (status = 400, description = "Role change not possible"),
        (status = 404, description = "User not found")
    ),
    tag = "admin"
)]
pub async fn update_user(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<MessageDto>> {
    state.service.update_user(user_id, dto).await?;

    state
        .audit
        .log(
            Some(admin.user_id),
            "User Updated",
            &format!("User ID {} updated", user_id),
            &client_ip(&headers),
        )
        .await;

    Ok(Json(MessageDto::new("User updated successfully")))
}

/// Deactivate a user account
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deactivated", body = MessageDto),
        (status = 400, description = "Attempted self-deletion"),
        (status = 404, description = "User not found")
    ),
    tag = "admin"
)]
pub async fn delete_user(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageDto>> {
    let (name, email) = state.service.delete_user(admin.user_id, user_id).await?;

    state
        .audit
        .log(
            Some(admin.user_id),
            "User Deleted",
            &format!("User {} ({}) deleted", name, email),
            &client_ip(&headers),
        )
        .await;

    Ok(Json(MessageDto::new("User deleted successfully")))
}

/// Active-user counts by role
#[utoipa::path(
    get,
    path = "/admin/users/stats",
    responses(
        (status = 200, description = "Counts", body = UserCountsDto)
    ),
    tag = "admin"
)]
pub async fn user_stats(
    State(state): State<AdminState>,
    RequireAdmin(_user): RequireAdmin,
) -> Result<Json<UserCountsDto>> {
    Ok(Json(state.service.user_counts().await?))
}
