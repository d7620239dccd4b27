use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::works::models::{NewWork, Work, WorkStatus};
use crate::shared::dates::format_timestamp;
use crate::shared::update_builder::{Assignment, FieldValue};

/// Allowed MIME types for preview images
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Allowed file extensions for preview images
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Maximum preview image size in bytes (5MB)
pub const MAX_PREVIEW_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Create-work form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler reads the multipart fields into [`CreateWorkFields`].
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateWorkFormDto {
    #[schema(example = "Individual Companies")]
    pub work_name: String,
    /// `category_id` of an active category
    #[schema(example = "call_analysis_20250314093015")]
    pub category: String,
    pub subcategory: Option<String>,
    #[schema(example = "1.0")]
    pub version: String,
    #[schema(example = "active")]
    pub status: String,
    /// Page path in the front-end application
    #[schema(example = "categories/calls_analysis/individual_companies.py")]
    pub streamlit_page: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub notes: Option<String>,
    /// Optional preview image (jpg, jpeg, png or gif, max 5MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Text fields of the create-work form
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateWorkFields {
    #[validate(length(min = 1, message = "Work name is required"))]
    pub work_name: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub subcategory: String,

    #[validate(length(min = 1, message = "Version is required"))]
    pub version: String,

    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,

    #[validate(length(min = 1, message = "Page path is required"))]
    pub streamlit_page: String,

    pub description: String,
    pub short_description: String,
    pub notes: String,
}

impl CreateWorkFields {
    /// Assign a multipart text field by name. Returns false for unknown fields.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "work_name" => &mut self.work_name,
            "category" => &mut self.category,
            "subcategory" => &mut self.subcategory,
            "version" => &mut self.version,
            "status" => &mut self.status,
            "streamlit_page" => &mut self.streamlit_page,
            "description" => &mut self.description,
            "short_description" => &mut self.short_description,
            "notes" => &mut self.notes,
            _ => return false,
        };
        *slot = value.trim().to_string();
        true
    }

    /// Build the insert for a freshly generated `work_id`; the slug mirrors the id
    pub fn into_new_work(
        self,
        work_id: String,
        status: WorkStatus,
        image_preview_url: Option<String>,
    ) -> NewWork {
        NewWork {
            work_slug: Some(work_id.clone()),
            subcategory: Some(self.subcategory),
            is_latest: Some(true),
            description: Some(self.description),
            short_description: Some(self.short_description),
            image_preview_url,
            notes: Some(self.notes),
            tags: Some(Vec::new()),
            ..NewWork::required(
                work_id,
                self.work_name,
                self.category,
                status,
                self.version,
                self.streamlit_page,
            )
        }
    }
}

/// Preview image received with the create-work form
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl PreviewImage {
    /// Lowercased extension of the uploaded file name
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// Check type and size limits
    pub fn validate(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("Preview image is empty".to_string());
        }

        if self.data.len() > MAX_PREVIEW_IMAGE_SIZE {
            return Err(format!(
                "Preview image too large. Maximum size is {} MB",
                MAX_PREVIEW_IMAGE_SIZE / 1024 / 1024
            ));
        }

        if !ALLOWED_IMAGE_MIME_TYPES.contains(&self.content_type.as_str()) {
            return Err(format!(
                "Image type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                ALLOWED_IMAGE_MIME_TYPES.join(", ")
            ));
        }

        match self.extension() {
            Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(format!(
                "Image file '{}' must have one of the extensions: {}",
                self.file_name,
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )),
        }
    }
}

/// Field-level update of a work. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkDto {
    #[validate(length(min = 1, message = "Work name must not be empty"))]
    pub work_name: Option<String>,
    pub work_slug: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub status: Option<WorkStatus>,
    #[validate(length(min = 1, message = "Version must not be empty"))]
    pub version: Option<String>,
    pub is_latest: Option<bool>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub notes: Option<String>,
    pub image_preview_url: Option<String>,
    pub streamlit_page: Option<String>,
    pub config_json: Option<String>,
    pub tags: Option<Vec<String>>,
    pub activated_date: Option<DateTime<Utc>>,
}

impl UpdateWorkDto {
    /// One assignment per supplied field, in column order
    pub fn assignments(&self) -> Vec<Assignment> {
        let text_fields = [
            ("work_name", &self.work_name),
            ("work_slug", &self.work_slug),
            ("category", &self.category),
            ("subcategory", &self.subcategory),
            ("version", &self.version),
            ("description", &self.description),
            ("short_description", &self.short_description),
            ("notes", &self.notes),
            ("image_preview_url", &self.image_preview_url),
            ("streamlit_page", &self.streamlit_page),
            ("config_json", &self.config_json),
        ];

        let mut assignments: Vec<Assignment> = text_fields
            .into_iter()
            .filter_map(|(column, value)| {
                value
                    .as_ref()
                    .map(|v| Assignment::new(column, FieldValue::Text(v.clone())))
            })
            .collect();

        if let Some(status) = self.status {
            assignments.push(Assignment::new("status", FieldValue::Status(status)));
        }
        if let Some(is_latest) = self.is_latest {
            assignments.push(Assignment::new("is_latest", FieldValue::Boolean(is_latest)));
        }
        if let Some(ref tags) = self.tags {
            assignments.push(Assignment::new("tags", FieldValue::TextArray(tags.clone())));
        }
        if let Some(at) = self.activated_date {
            assignments.push(Assignment::new("activated_date", FieldValue::Timestamp(at)));
        }

        assignments
    }
}

/// Response DTO for work
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkResponseDto {
    pub work_id: String,
    pub work_name: String,
    pub work_slug: String,
    pub category: String,
    pub subcategory: String,
    pub status: WorkStatus,
    /// Glyph for `status`
    pub status_badge: String,
    pub version: String,
    pub is_latest: bool,
    pub description: String,
    pub short_description: String,
    pub image_preview_url: String,
    pub streamlit_page: String,
    pub config_json: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub archived_date: Option<DateTime<Utc>>,
    /// `created_date` as `DD/MM/YYYY HH:MM`
    pub created_date_display: String,
}

impl From<Work> for WorkResponseDto {
    fn from(w: Work) -> Self {
        Self {
            status_badge: w.status.badge().to_string(),
            created_date_display: format_timestamp(Some(&w.created_date)),
            work_id: w.work_id,
            work_name: w.work_name,
            work_slug: w.work_slug,
            category: w.category,
            subcategory: w.subcategory,
            status: w.status,
            version: w.version,
            is_latest: w.is_latest,
            description: w.description,
            short_description: w.short_description,
            image_preview_url: w.image_preview_url,
            streamlit_page: w.streamlit_page,
            config_json: w.config_json,
            notes: w.notes,
            tags: w.tags,
            created_date: w.created_date,
            updated_date: w.updated_date,
            activated_date: w.activated_date,
            archived_date: w.archived_date,
        }
    }
}

/// Selectable work status with its badge
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkStatusDto {
    pub status: WorkStatus,
    pub badge: String,
}

impl From<WorkStatus> for WorkStatusDto {
    fn from(status: WorkStatus) -> Self {
        Self {
            status,
            badge: status.badge().to_string(),
        }
    }
}
