use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignOfficerDto {
    pub report_id: Option<i64>,
    pub officer_id: Option<i64>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStatsDto {
    pub total_users: i64,
    pub victims: i64,
    pub officers: i64,
    pub admins: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportStatsDto {
    pub total_reports: i64,
    pub open_cases: i64,
    pub in_progress: i64,
    pub closed_cases: i64,
    pub unassigned_cases: i64,
}

/// Per-officer caseload line in the analytics overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfficerCaseloadDto {
    pub officer_name: String,
    pub total_cases: i64,
    pub closed_cases: i64,
    pub avg_response_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveCaseDto {
    pub id: i64,
    pub crime_type: String,
    pub description: String,
    pub date_occurred: String,
    pub date_submitted: String,
    pub location: String,
    pub status: String,
    pub priority: String,
    pub victim_name: String,
    pub assigned_officer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvidenceSummaryDto {
    pub report_id: i64,
    pub crime_type: String,
    pub evidence_count: i64,
    pub total_size: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsResponseDto {
    pub user_stats: UserStatsDto,
    pub report_stats: ReportStatsDto,
    pub reports_per_officer: Vec<OfficerCaseloadDto>,
    pub active_cases: Vec<ActiveCaseDto>,
    pub evidence_summary: Vec<EvidenceSummaryDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveCasesResponseDto {
    pub active_cases: Vec<ActiveCaseDto>,
}

/// Full officer performance row, including department.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfficerPerformanceDto {
    pub officer_id: i64,
    pub officer_name: String,
    pub department: String,
    pub total_cases: i64,
    pub closed_cases: i64,
    pub avg_response_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfficerPerformanceResponseDto {
    pub officer_performance: Vec<OfficerPerformanceDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditTrailEntryDto {
    pub id: i64,
    pub action: String,
    pub details: String,
    pub status: String,
    pub ip_address: String,
    pub timestamp: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub user_role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditTrailResponseDto {
    pub audit_trail: Vec<AuditTrailEntryDto>,
}

/// Audit log entry for the management console, with the legacy field names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditLogEntryDto {
    pub id: i64,
    pub action: String,
    pub details: String,
    pub status: String,
    pub ip_address: String,
    pub timestamp: String,
    pub user: String,
    pub user_email: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditLogsResponseDto {
    pub logs: Vec<AuditLogEntryDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReportDto {
    pub id: i64,
    pub crime_type: String,
    pub description: String,
    pub date_occurred: String,
    pub date_submitted: String,
    pub location: String,
    pub status: String,
    pub priority: String,
    pub victim_name: String,
    pub victim_phone: String,
    pub assigned_officer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReportsResponseDto {
    pub reports: Vec<AdminReportDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableOfficerDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub department: String,
    pub badge: String,
    pub rank: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableOfficersResponseDto {
    pub officers: Vec<AvailableOfficerDto>,
}

/// User line in the management console.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminUserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    #[serde(rename = "joinDate")]
    pub join_date: String,
    pub specialization: String,
    pub department: String,
    pub badge: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminUsersResponseDto {
    pub users: Vec<AdminUserDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub specialization: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserCountsDto {
    pub total: i64,
    pub victims: i64,
    pub officers: i64,
    pub admins: i64,
}
