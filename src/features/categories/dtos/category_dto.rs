use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::dates::format_timestamp;
use crate::shared::update_builder::{Assignment, FieldValue};

/// Request DTO for the create-category form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Display name, also the source of the generated identifier
    #[validate(length(min = 1, max = 200, message = "Category name is required"))]
    #[schema(example = "Call Analysis")]
    pub category_name: String,

    /// One of the glyphs from `GET /api/admin/categories/icons` (default 📊)
    #[schema(example = "📞")]
    pub category_icon: Option<String>,

    /// Sort key, lower first (default 999)
    #[validate(range(min = 1, message = "Display order must be a positive integer"))]
    #[schema(example = 1)]
    pub display_order: Option<i32>,
}

/// Request DTO for the edit-category form. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 200, message = "Category name must not be empty"))]
    pub category_name: Option<String>,

    pub category_icon: Option<String>,

    #[validate(range(min = 1, message = "Display order must be a positive integer"))]
    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

impl UpdateCategoryDto {
    /// One assignment per supplied field, in column order
    pub fn assignments(&self) -> Vec<Assignment> {
        let mut assignments = Vec::new();

        if let Some(ref name) = self.category_name {
            assignments.push(Assignment::new(
                "category_name",
                FieldValue::Text(name.clone()),
            ));
        }
        if let Some(ref icon) = self.category_icon {
            assignments.push(Assignment::new(
                "category_icon",
                FieldValue::Text(icon.clone()),
            ));
        }
        if let Some(order) = self.display_order {
            assignments.push(Assignment::new("display_order", FieldValue::Integer(order)));
        }
        if let Some(active) = self.is_active {
            assignments.push(Assignment::new("is_active", FieldValue::Boolean(active)));
        }

        assignments
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    /// `created_date` as `DD/MM/YYYY HH:MM`
    pub created_date_display: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        let created_date_display = format_timestamp(Some(&c.created_date));
        Self {
            category_id: c.category_id,
            category_name: c.category_name,
            category_icon: c.category_icon,
            display_order: c.display_order,
            is_active: c.is_active,
            created_date: c.created_date,
            updated_date: c.updated_date,
            created_date_display,
        }
    }
}
