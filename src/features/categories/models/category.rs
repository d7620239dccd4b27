use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a work category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Input of a category insert, before defaults and timestamps are applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub display_order: Option<i32>,
}
