//! Mess menu domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Meals served per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Breakfast" => Some(MealType::Breakfast),
            "Lunch" => Some(MealType::Lunch),
            "Dinner" => Some(MealType::Dinner),
            _ => None,
        }
    }
}

/// Menu for one meal on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessMenu {
    pub id: Uuid,
    pub menu_date: NaiveDate,
    pub meal_type: MealType,
    /// Dishes in serving order.
    pub items: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or replacing a menu.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessMenuRequest {
    pub menu_date: NaiveDate,
    pub meal_type: MealType,

    #[validate(length(min = 1, max = 30, message = "Menu must list 1-30 items"))]
    pub items: Vec<String>,
}

/// Request payload for updating a menu's items.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessMenuRequest {
    #[validate(length(min = 1, max = 30, message = "Menu must list 1-30 items"))]
    pub items: Vec<String>,
}

/// Query parameters for listing menus.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMenusQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
