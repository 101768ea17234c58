use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::cases::{dtos as cases_dtos, handlers as cases_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::signup,
        auth_handlers::login,
        // Profile
        users_handlers::get_profile,
        users_handlers::update_profile,
        users_handlers::change_password,
        users_handlers::profile_stats,
        // Victim
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::report_details,
        reports_handlers::add_evidence,
        reports_handlers::report_logs,
        // Officer
        cases_handlers::assigned_cases,
        cases_handlers::case_details,
        cases_handlers::update_status,
        cases_handlers::case_evidence,
        cases_handlers::upload_case_evidence,
        cases_handlers::case_logs,
        cases_handlers::add_case_log,
        cases_handlers::workload,
        cases_handlers::all_evidence,
        // Admin
        admin_handlers::assign_officer,
        admin_handlers::analytics,
        admin_handlers::active_cases,
        admin_handlers::officer_performance,
        admin_handlers::audit_trail,
        admin_handlers::audit_logs,
        admin_handlers::reset_audit_logs,
        admin_handlers::all_reports,
        admin_handlers::available_officers,
        admin_handlers::list_users,
        admin_handlers::update_user,
        admin_handlers::delete_user,
        admin_handlers::user_stats,
    ),
    components(
        schemas(
            // Shared
            types::MessageDto,
            types::EvidenceDto,
            types::EvidenceListResponseDto,
            types::CaseLogDto,
            types::CaseLogsResponseDto,
            // Auth
            auth_dtos::SignupDto,
            auth_dtos::LoginDto,
            auth_dtos::SignupResponseDto,
            auth_dtos::LoginResponseDto,
            // Profile
            users_dtos::ProfileDto,
            users_dtos::ProfileResponseDto,
            users_dtos::UpdateProfileDto,
            users_dtos::ChangePasswordDto,
            users_dtos::ProfileStatsDto,
            users_dtos::ProfileStatsResponseDto,
            // Victim
            reports_dtos::ReportDto,
            reports_dtos::ReportsResponseDto,
            reports_dtos::ReportDetailsDto,
            reports_dtos::ReportDetailsResponseDto,
            reports_dtos::SubmitReportResponseDto,
            // Officer
            cases_dtos::CaseDto,
            cases_dtos::CasesResponseDto,
            cases_dtos::CaseResponseDto,
            cases_dtos::AssignedCasesQuery,
            cases_dtos::UpdateStatusDto,
            cases_dtos::AddCaseLogDto,
            cases_dtos::WorkloadDto,
            cases_dtos::WorkloadResponseDto,
            cases_dtos::CaseEvidenceDto,
            cases_dtos::CaseEvidenceListResponseDto,
            // Admin
            admin_dtos::AssignOfficerDto,
            admin_dtos::UserStatsDto,
            admin_dtos::ReportStatsDto,
            admin_dtos::OfficerCaseloadDto,
            admin_dtos::ActiveCaseDto,
            admin_dtos::EvidenceSummaryDto,
            admin_dtos::AnalyticsResponseDto,
            admin_dtos::ActiveCasesResponseDto,
            admin_dtos::OfficerPerformanceDto,
            admin_dtos::OfficerPerformanceResponseDto,
            admin_dtos::AuditTrailEntryDto,
            admin_dtos::AuditTrailResponseDto,
            admin_dtos::AuditLogEntryDto,
            admin_dtos::AuditLogsResponseDto,
            admin_dtos::AdminReportDto,
            admin_dtos::AdminReportsResponseDto,
            admin_dtos::AvailableOfficerDto,
            admin_dtos::AvailableOfficersResponseDto,
            admin_dtos::AdminUserDto,
            admin_dtos::AdminUsersResponseDto,
            admin_dtos::UpdateUserDto,
            admin_dtos::UserCountsDto,
        )
    ),
    tags(
        (name = "auth", description = "Registration and session login"),
        (name = "profile", description = "Profile management for any authenticated role"),
        (name = "victim", description = "Crime reporting and evidence for victims"),
        (name = "officer", description = "Casework for assigned officers"),
        (name = "admin", description = "Assignment, analytics and user management"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cybercase API",
        version = "0.1.0",
        description = "API documentation for the cybercrime case-management backend",
    )
)]
pub struct ApiDoc;

/// Adds the session-cookie security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
