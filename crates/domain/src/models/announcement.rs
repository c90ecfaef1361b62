//! Announcement domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::access::Role;

/// A portal announcement.
///
/// `target_roles` empty means the announcement is visible to everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_urgent: bool,
    pub target_roles: Vec<Role>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Whether a reader with the given role should see this announcement.
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.target_roles.is_empty() || self.target_roles.contains(&role)
    }
}

/// Request payload for posting an announcement.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    #[serde(default)]
    pub is_urgent: bool,

    /// Empty list targets all roles.
    #[serde(default)]
    pub target_roles: Vec<Role>,
}

/// Response for listing announcements.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnnouncementsResponse {
    pub announcements: Vec<Announcement>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ALL_ROLES;

    fn announcement_for(target_roles: Vec<Role>) -> Announcement {
        Announcement {
            id: Uuid::new_v4(),
            title: "Exam schedule".to_string(),
            content: "Mid-semester exams begin Monday.".to_string(),
            is_urgent: false,
            target_roles,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_target_roles_visible_to_everyone() {
        let announcement = announcement_for(vec![]);
        for role in ALL_ROLES {
            assert!(announcement.is_visible_to(role), "{:?}", role);
        }
    }

    #[test]
    fn test_targeted_announcement_visible_only_to_named_roles() {
        let announcement = announcement_for(vec![Role::Student, Role::Faculty]);
        assert!(announcement.is_visible_to(Role::Student));
        assert!(announcement.is_visible_to(Role::Faculty));
        assert!(!announcement.is_visible_to(Role::Admin));
        assert!(!announcement.is_visible_to(Role::Director));
        assert!(!announcement.is_visible_to(Role::HostelWarden));
    }

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"title": "Notice", "content": "Body"}"#;
        let req: CreateAnnouncementRequest = serde_json::from_str(json).unwrap();
        assert!(!req.is_urgent);
        assert!(req.target_roles.is_empty());
    }

    #[test]
    fn test_create_request_with_targets() {
        let json = r#"{
            "title": "Hostel notice",
            "content": "Water maintenance",
            "isUrgent": true,
            "targetRoles": ["Student", "Hostel Warden"]
        }"#;
        let req: CreateAnnouncementRequest = serde_json::from_str(json).unwrap();
        assert!(req.is_urgent);
        assert_eq!(req.target_roles, vec![Role::Student, Role::HostelWarden]);
    }
}
