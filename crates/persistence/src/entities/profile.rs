//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::access::Role;
use domain::models::profile::Profile;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub batch: Option<String>,
    pub phone: Option<String>,
    pub roll_number: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for Profile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            email: entity.email,
            full_name: entity.full_name,
            // The role column has a CHECK constraint over the known set
            role: Role::parse(&entity.role).unwrap_or(Role::Student),
            department: entity.department,
            batch: entity.batch,
            phone: entity.phone,
            roll_number: entity.roll_number,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entity(role: &str) -> ProfileEntity {
        ProfileEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "warden@iiitm.ac.in".to_string(),
            full_name: "The Warden".to_string(),
            role: role.to_string(),
            department: None,
            batch: None,
            phone: None,
            roll_number: None,
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_entity_to_domain() {
        let entity = sample_entity("Hostel Warden");
        let profile: Profile = entity.clone().into();

        assert_eq!(profile.user_id, entity.user_id);
        assert_eq!(profile.role, Role::HostelWarden);
        assert_eq!(profile.full_name, "The Warden");
    }

    #[test]
    fn test_two_word_roles_parse() {
        assert_eq!(
            Profile::from(sample_entity("Academic Section")).role,
            Role::AcademicSection
        );
        assert_eq!(
            Profile::from(sample_entity("Mess Supervisor")).role,
            Role::MessSupervisor
        );
    }
}
