//! Announcement entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::access::Role;
use domain::models::announcement::Announcement;

/// Database row mapping for the announcements table.
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementEntity {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_urgent: bool,
    pub target_roles: Vec<String>, // SQLx maps TEXT[] to Vec<String>
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<AnnouncementEntity> for Announcement {
    fn from(entity: AnnouncementEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            is_urgent: entity.is_urgent,
            target_roles: entity
                .target_roles
                .iter()
                .filter_map(|s| Role::parse(s))
                .collect(),
            author_id: entity.author_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_filters_unknown_roles() {
        let entity = AnnouncementEntity {
            id: Uuid::new_v4(),
            title: "Notice".to_string(),
            content: "Body".to_string(),
            is_urgent: false,
            target_roles: vec![
                "Student".to_string(),
                "Registrar".to_string(),
                "Hostel Warden".to_string(),
            ],
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let announcement: Announcement = entity.into();
        assert_eq!(
            announcement.target_roles,
            vec![Role::Student, Role::HostelWarden]
        );
    }

    #[test]
    fn test_empty_targets_stay_empty() {
        let entity = AnnouncementEntity {
            id: Uuid::new_v4(),
            title: "For all".to_string(),
            content: "Body".to_string(),
            is_urgent: true,
            target_roles: vec![],
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let announcement: Announcement = entity.into();
        assert!(announcement.target_roles.is_empty());
        assert!(announcement.is_visible_to(Role::Director));
    }
}
