use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::types::EvidenceDto;

/// Report row as listed for its victim.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDto {
    pub id: i64,
    pub victim_id: i64,
    pub crime_type: String,
    pub description: String,
    pub date_occurred: String,
    pub date_submitted: String,
    pub location: String,
    pub status: String,
    pub priority: String,
    pub assigned_officer_id: Option<i64>,
    pub assignment_date: Option<String>,
    pub victim_name: String,
    pub assigned_officer_name: Option<String>,
    pub evidence_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportsResponseDto {
    pub reports: Vec<ReportDto>,
}

/// Full report view including the assigned officer's contact details and the
/// attached evidence.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDetailsDto {
    pub id: i64,
    pub victim_id: i64,
    pub crime_type: String,
    pub description: String,
    pub date_occurred: String,
    pub date_submitted: String,
    pub location: String,
    pub status: String,
    pub priority: String,
    pub assigned_officer_id: Option<i64>,
    pub assignment_date: Option<String>,
    pub victim_name: String,
    pub assigned_officer_name: Option<String>,
    pub assigned_officer_email: Option<String>,
    pub badge_number: Option<String>,
    pub specialization: Option<String>,
    pub evidence: Vec<EvidenceDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDetailsResponseDto {
    pub report: ReportDetailsDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitReportResponseDto {
    pub message: String,
    pub report_id: i64,
    pub evidence_count: usize,
}
