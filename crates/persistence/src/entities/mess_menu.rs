//! Mess menu entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::mess_menu::{MealType, MessMenu};

/// Database row mapping for the mess_menus table.
#[derive(Debug, Clone, FromRow)]
pub struct MessMenuEntity {
    pub id: Uuid,
    pub menu_date: NaiveDate,
    pub meal_type: String,
    pub items: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MessMenuEntity> for MessMenu {
    fn from(entity: MessMenuEntity) -> Self {
        Self {
            id: entity.id,
            menu_date: entity.menu_date,
            // CHECK constraint restricts the column to the known set
            meal_type: MealType::parse(&entity.meal_type).unwrap_or(MealType::Breakfast),
            items: entity.items,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
