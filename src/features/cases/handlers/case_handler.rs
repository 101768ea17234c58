use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireOfficer;
use crate::features::cases::dtos::{
    AddCaseLogDto, AssignedCasesQuery, CaseEvidenceListResponseDto, CaseResponseDto,
    CasesResponseDto, UpdateStatusDto, WorkloadResponseDto,
};
use crate::features::cases::routes::CasesState;
use crate::shared::multipart::parse_multipart;
use crate::shared::types::{CaseLogsResponseDto, EvidenceListResponseDto, MessageDto};
use validator::Validate;

/// Cases assigned to the authenticated officer, filtered and sorted
#[utoipa::path(
    get,
    path = "/officer/assigned_cases",
    params(
        ("status" = Option<String>, Query, description = "Status filter, 'All Status' disables"),
        ("crimeType" = Option<String>, Query, description = "Crime type filter, 'All Types' disables"),
        ("search" = Option<String>, Query, description = "Matches victim name or crime type"),
        ("sortBy" = Option<String>, Query, description = "Sort label")
    ),
    responses(
        (status = 200, description = "Assigned cases", body = CasesResponseDto),
        (status = 401, description = "Not an officer session")
    ),
    tag = "officer"
)]
pub async fn assigned_cases(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Query(query): Query<AssignedCasesQuery>,
) -> Result<Json<CasesResponseDto>> {
    let cases = state.service.assigned_cases(user.user_id, &query).await?;
    Ok(Json(CasesResponseDto { cases }))
}

/// Details of one assigned case
#[utoipa::path(
    get,
    path = "/officer/case/{id}",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case details", body = CaseResponseDto),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn case_details(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
) -> Result<Json<CaseResponseDto>> {
    let case_details = state.service.case_details(user.user_id, case_id).await?;
    Ok(Json(CaseResponseDto { case_details }))
}

/// Move an assigned case to a new status
#[utoipa::path(
    put,
    path = "/officer/case/{id}",
    params(("id" = i64, Path, description = "Case id")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = MessageDto),
        (status = 400, description = "Status missing"),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn update_status(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<MessageDto>> {
    dto.validate()?;
    let status = dto.status.as_deref().unwrap_or_default();

    state
        .service
        .update_status(user.user_id, case_id, status)
        .await?;

    Ok(Json(MessageDto::new("Status updated successfully")))
}

/// Evidence on one assigned case
#[utoipa::path(
    get,
    path = "/officer/case/{id}/evidence",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Evidence list", body = EvidenceListResponseDto),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn case_evidence(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
) -> Result<Json<EvidenceListResponseDto>> {
    let evidence = state.service.evidence(user.user_id, case_id).await?;
    Ok(Json(EvidenceListResponseDto {
        message: None,
        evidence,
    }))
}

/// Upload evidence to an assigned case
#[utoipa::path(
    post,
    path = "/officer/case/{id}/evidence",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Updated evidence list", body = EvidenceListResponseDto),
        (status = 400, description = "No usable files in the request"),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn upload_case_evidence(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<EvidenceListResponseDto>> {
    let form = parse_multipart(multipart).await?;
    let evidence = state
        .service
        .add_evidence(user.user_id, case_id, &form.files)
        .await?;

    Ok(Json(EvidenceListResponseDto {
        message: Some("Evidence added successfully".to_string()),
        evidence,
    }))
}

/// Log entries for one assigned case
#[utoipa::path(
    get,
    path = "/officer/case/{id}/logs",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case log entries", body = CaseLogsResponseDto),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn case_logs(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
) -> Result<Json<CaseLogsResponseDto>> {
    let logs = state.service.logs(user.user_id, case_id).await?;
    Ok(Json(CaseLogsResponseDto { logs }))
}

/// Append a log entry to an assigned case
#[utoipa::path(
    post,
    path = "/officer/case/{id}/logs",
    params(("id" = i64, Path, description = "Case id")),
    request_body = AddCaseLogDto,
    responses(
        (status = 200, description = "Entry saved", body = MessageDto),
        (status = 400, description = "Action or notes missing"),
        (status = 404, description = "Not found or assigned elsewhere")
    ),
    tag = "officer"
)]
pub async fn add_case_log(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
    Path(case_id): Path<i64>,
    AppJson(dto): AppJson<AddCaseLogDto>,
) -> Result<Json<MessageDto>> {
    dto.validate()?;
    let action = dto.action.as_deref().unwrap_or_default();
    let notes = dto.notes.as_deref().unwrap_or_default();

    state
        .service
        .add_log(user.user_id, case_id, action, notes)
        .await?;

    Ok(Json(MessageDto::new("Log entry saved successfully.")))
}

/// The officer's open/closed case counters
#[utoipa::path(
    get,
    path = "/officer/workload",
    responses(
        (status = 200, description = "Workload counters", body = WorkloadResponseDto),
        (status = 401, description = "Not an officer session")
    ),
    tag = "officer"
)]
pub async fn workload(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
) -> Result<Json<WorkloadResponseDto>> {
    let workload = state.service.workload(user.user_id).await?;
    Ok(Json(WorkloadResponseDto { workload }))
}

/// Evidence across all of the officer's assigned cases
#[utoipa::path(
    get,
    path = "/officer/all_evidence",
    responses(
        (status = 200, description = "Evidence list", body = CaseEvidenceListResponseDto),
        (status = 401, description = "Not an officer session")
    ),
    tag = "officer"
)]
pub async fn all_evidence(
    State(state): State<CasesState>,
    RequireOfficer(user): RequireOfficer,
) -> Result<Json<CaseEvidenceListResponseDto>> {
    let evidence = state.service.all_evidence(user.user_id).await?;
    Ok(Json(CaseEvidenceListResponseDto { evidence }))
}
