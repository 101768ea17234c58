use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile shape returned by `GET /profile`. Role-specific fields are only
/// present for the matching role.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: String,
    pub join_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponseDto {
    pub profile: ProfileDto,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

pub use crate::shared::types::MessageDto;

/// Personal workload counters shown on the profile page.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ProfileStatsDto {
    pub total_reports: i64,
    pub active_cases: i64,
    pub completed_cases: i64,
    pub total_evidence: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileStatsResponseDto {
    pub stats: ProfileStatsDto,
}
