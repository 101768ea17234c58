use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Case as seen by its assigned officer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseDto {
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
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CasesResponseDto {
    pub cases: Vec<CaseDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseResponseDto {
    #[serde(rename = "case")]
    pub case_details: CaseDto,
}

/// Filters for the assigned-cases list. The sentinel values "All Status" and
/// "All Types" disable the corresponding filter.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignedCasesQuery {
    #[serde(default = "default_status_filter")]
    pub status: String,
    #[serde(rename = "crimeType", default = "default_type_filter")]
    pub crime_type: String,
    #[serde(default)]
    pub search: String,
    #[serde(rename = "sortBy", default = "default_sort")]
    pub sort_by: String,
}

fn default_status_filter() -> String {
    "All Status".to_string()
}

fn default_type_filter() -> String {
    "All Types".to_string()
}

fn default_sort() -> String {
    "Date Reported".to_string()
}

impl Default for AssignedCasesQuery {
    fn default() -> Self {
        Self {
            status: default_status_filter(),
            crime_type: default_type_filter(),
            search: String::new(),
            sort_by: default_sort(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusDto {
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddCaseLogDto {
    #[validate(
        required(message = "Action and notes are required"),
        length(min = 1, message = "Action and notes are required")
    )]
    pub action: Option<String>,
    #[validate(
        required(message = "Action and notes are required"),
        length(min = 1, message = "Action and notes are required")
    )]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkloadDto {
    pub total_cases: i64,
    pub open_cases: i64,
    pub in_progress: i64,
    pub closed_cases: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkloadResponseDto {
    pub workload: WorkloadDto,
}

/// Evidence across every case assigned to the officer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseEvidenceDto {
    pub id: i64,
    pub case_id: i64,
    pub filename: String,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub upload_date: String,
    pub crime_type: String,
    pub status: String,
    pub victim_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseEvidenceListResponseDto {
    pub evidence: Vec<CaseEvidenceDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    #[test]
    fn missing_status_maps_to_required_message() {
        let dto = UpdateStatusDto { status: None };
        let err = AppError::from(dto.validate().unwrap_err());
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Status is required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_status_is_rejected() {
        let dto = UpdateStatusDto {
            status: Some(String::new()),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn log_entry_requires_action_and_notes() {
        let dto = AddCaseLogDto {
            action: Some("Interviewed witness".to_string()),
            notes: None,
        };
        let err = AppError::from(dto.validate().unwrap_err());
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Action and notes are required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn complete_log_entry_passes_validation() {
        let dto = AddCaseLogDto {
            action: Some("Evidence Review".to_string()),
            notes: Some("Checked the submitted screenshots".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
