use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};

use crate::core::error::Result;
use crate::core::middleware::client_ip;
use crate::features::auth::guards::RequireVictim;
use crate::features::reports::dtos::{
    ReportDetailsResponseDto, ReportsResponseDto, SubmitReportResponseDto,
};
use crate::features::reports::routes::ReportsState;
use crate::features::reports::services::report_service::NewReport;
use crate::shared::multipart::parse_multipart;
use crate::shared::types::{CaseLogsResponseDto, EvidenceListResponseDto};

/// File a new crime report with optional evidence attachments
#[utoipa::path(
    post,
    path = "/victim/report",
    responses(
        (status = 200, description = "Report filed", body = SubmitReportResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Not a victim session")
    ),
    tag = "victim"
)]
pub async fn submit_report(
    State(state): State<ReportsState>,
    RequireVictim(user): RequireVictim,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<SubmitReportResponseDto>> {
    let form = parse_multipart(multipart).await?;
    let report = NewReport::from_form(&form)?;

    let (report_id, evidence_count) = state
        .service
        .submit(user.user_id, report, &form.files)
        .await?;

    state
        .audit
        .log(
            Some(user.user_id),
            "Report Submitted",
            &format!("Crime report #{} submitted", report_id),
            &client_ip(&headers),
        )
        .await;

    Ok(Json(SubmitReportResponseDto {
        message: "Report submitted successfully".to_string(),
        report_id,
        evidence_count,
    }))
}

/// List the authenticated victim's reports
#[utoipa::path(
    get,
    path = "/victim/reports",
    responses(
        (status = 200, description = "Reports for this victim", body = ReportsResponseDto),
        (status = 401, description = "Not a victim session")
    ),
    tag = "victim"
)]
pub async fn list_reports(
    State(state): State<ReportsState>,
    RequireVictim(user): RequireVictim,
) -> Result<Json<ReportsResponseDto>> {
    let reports = state.service.list(user.user_id).await?;
    Ok(Json(ReportsResponseDto { reports }))
}

/// Report details including evidence, owner only
#[utoipa::path(
    get,
    path = "/victim/report/{id}",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report details", body = ReportDetailsResponseDto),
        (status = 404, description = "Not found or owned by someone else")
    ),
    tag = "victim"
)]
pub async fn report_details(
    State(state): State<ReportsState>,
    RequireVictim(user): RequireVictim,
    Path(report_id): Path<i64>,
) -> Result<Json<ReportDetailsResponseDto>> {
    let report = state.service.details(user.user_id, report_id).await?;
    Ok(Json(ReportDetailsResponseDto { report }))
}

/// Attach more evidence to an owned report
#[utoipa::path(
    post,
    path = "/victim/report/{id}/evidence",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Updated evidence list", body = EvidenceListResponseDto),
        (status = 404, description = "Not found or owned by someone else")
    ),
    tag = "victim"
)]
pub async fn add_evidence(
    State(state): State<ReportsState>,
    RequireVictim(user): RequireVictim,
    Path(report_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<EvidenceListResponseDto>> {
    let form = parse_multipart(multipart).await?;
    let evidence = state
        .service
        .add_evidence(user.user_id, report_id, &form.files)
        .await?;

    Ok(Json(EvidenceListResponseDto {
        message: Some("Evidence added successfully".to_string()),
        evidence,
    }))
}

/// Case log entries for an owned report
#[utoipa::path(
    get,
    path = "/victim/report/{id}/logs",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Case log entries", body = CaseLogsResponseDto),
        (status = 404, description = "Not found or owned by someone else")
    ),
    tag = "victim"
)]
pub async fn report_logs(
    State(state): State<ReportsState>,
    RequireVictim(user): RequireVictim,
    Path(report_id): Path<i64>,
) -> Result<Json<CaseLogsResponseDto>> {
    let logs = state.service.logs(user.user_id, report_id).await?;
    Ok(Json(CaseLogsResponseDto { logs }))
}
