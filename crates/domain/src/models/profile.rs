//! Profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::access::Role;

/// A user's portal profile, 1:1 with the auth user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub department: Option<String>,
    pub batch: Option<String>,
    pub phone: Option<String>,
    pub roll_number: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a profile. Only provided fields change.
///
/// Role is deliberately absent: role changes go through user management.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub batch: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 30))]
    pub roll_number: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
}

/// Response payload for profile reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id,
            email: p.email,
            full_name: p.full_name,
            role: p.role,
            department: p.department,
            batch: p.batch,
            phone: p.phone,
            roll_number: p.roll_number,
            bio: p.bio,
            avatar_url: p.avatar_url,
            created_at: p.created_at,
        }
    }
}

/// Response for listing profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProfilesResponse {
    pub profiles: Vec<ProfileResponse>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "student@iiitm.ac.in".to_string(),
            full_name: "A Student".to_string(),
            role: Role::Student,
            department: Some("CSE".to_string()),
            batch: Some("2023".to_string()),
            phone: None,
            roll_number: Some("2101CS001".to_string()),
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_response_serialization_uses_camel_case() {
        let response: ProfileResponse = sample_profile().into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"fullName\":\"A Student\""));
        assert!(json.contains("\"role\":\"Student\""));
        assert!(json.contains("\"rollNumber\":\"2101CS001\""));
        // None fields are omitted, not null
        assert!(!json.contains("\"phone\""));
    }

    #[test]
    fn test_update_request_validation() {
        use validator::Validate;

        let ok = UpdateProfileRequest {
            full_name: Some("New Name".to_string()),
            department: None,
            batch: None,
            phone: Some("+919876543210".to_string()),
            roll_number: None,
            bio: None,
            avatar_url: None,
        };
        assert!(ok.validate().is_ok());

        let bad_phone = UpdateProfileRequest {
            phone: Some("nope".to_string()),
            ..ok.clone()
        };
        assert!(bad_phone.validate().is_err());

        let empty_name = UpdateProfileRequest {
            full_name: Some(String::new()),
            ..ok
        };
        assert!(empty_name.validate().is_err());
    }
}
