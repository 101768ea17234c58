use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::features::auth::model::Role;

/// Registration payload. Role-specific fields are optional at the wire level
/// and validated per role.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    /// National ID, victims only
    pub nid: Option<String>,
    pub badge: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    #[serde(rename = "adminCode")]
    pub admin_code: Option<String>,
    pub position: Option<String>,
}

/// Validated role-specific signup data.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Victim {
        nid: String,
    },
    Officer {
        badge_number: String,
        department: String,
        specialization: String,
    },
    Admin {
        admin_code: String,
        position: String,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Victim { .. } => Role::Victim,
            RoleProfile::Officer { .. } => Role::Officer,
            RoleProfile::Admin { .. } => Role::Admin,
        }
    }
}

/// Common account fields present for every role.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub profile: RoleProfile,
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check password agreement, role validity and per-role required fields,
/// in that order.
pub fn validate_signup(dto: &SignupDto) -> Result<SignupData, AppError> {
    if dto.password != dto.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }

    let role = dto.role.as_deref().unwrap_or_default();

    let profile = match role {
        "victim" => RoleProfile::Victim {
            nid: required(&dto.nid)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
        },
        "officer" => RoleProfile::Officer {
            badge_number: required(&dto.badge)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
            department: required(&dto.department)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
            specialization: required(&dto.specialization)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
        },
        "admin" => RoleProfile::Admin {
            admin_code: required(&dto.admin_code)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
            position: required(&dto.position)
                .ok_or_else(|| AppError::BadRequest("All fields are required".to_string()))?,
        },
        _ => return Err(AppError::BadRequest("Invalid role".to_string())),
    };

    let name = required(&dto.name);
    let email = required(&dto.email);
    let password = required(&dto.password);
    let phone = required(&dto.phone);

    match (name, email, password, phone) {
        (Some(name), Some(email), Some(password), Some(phone)) => Ok(SignupData {
            name,
            email,
            password,
            phone,
            profile,
        }),
        _ => Err(AppError::BadRequest("All fields are required".to_string())),
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponseDto {
    pub message: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponseDto {
    pub message: String,
    pub role: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn victim_dto() -> SignupDto {
        SignupDto {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some("secret".to_string()),
            confirm_password: Some("secret".to_string()),
            role: Some("victim".to_string()),
            phone: Some("5550100".to_string()),
            nid: Some("NID-1".to_string()),
            badge: None,
            department: None,
            specialization: None,
            admin_code: None,
            position: None,
        }
    }

    #[test]
    fn valid_victim_signup_passes() {
        let data = validate_signup(&victim_dto()).unwrap();
        assert_eq!(data.email, "alice@example.com");
        assert_eq!(
            data.profile,
            RoleProfile::Victim {
                nid: "NID-1".to_string()
            }
        );
    }

    #[test]
    fn mismatched_passwords_rejected() {
        let mut dto = victim_dto();
        dto.confirm_password = Some("other".to_string());
        let err = validate_signup(&dto).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Passwords do not match"));
    }

    #[test]
    fn unknown_role_rejected() {
        let mut dto = victim_dto();
        dto.role = Some("superuser".to_string());
        let err = validate_signup(&dto).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid role"));
    }

    #[test]
    fn missing_role_field_rejected() {
        let mut dto = victim_dto();
        dto.nid = None;
        let err = validate_signup(&dto).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "All fields are required"));
    }

    #[test]
    fn officer_requires_all_profile_fields() {
        let dto = SignupDto {
            role: Some("officer".to_string()),
            badge: Some("B-9".to_string()),
            department: Some("Cyber".to_string()),
            specialization: None,
            nid: None,
            admin_code: None,
            position: None,
            ..victim_dto()
        };
        let err = validate_signup(&dto).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "All fields are required"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut dto = victim_dto();
        dto.phone = Some("   ".to_string());
        let err = validate_signup(&dto).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "All fields are required"));
    }
}
