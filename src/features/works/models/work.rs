use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Work status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "work_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Active,
    Paused,
    Archived,
    Maintenance,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 4] = [
        WorkStatus::Active,
        WorkStatus::Paused,
        WorkStatus::Archived,
        WorkStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Active => "active",
            WorkStatus::Paused => "paused",
            WorkStatus::Archived => "archived",
            WorkStatus::Maintenance => "maintenance",
        }
    }

    /// Glyph shown next to the status in list views
    pub fn badge(&self) -> &'static str {
        match self {
            WorkStatus::Active => "🟢",
            WorkStatus::Paused => "⏸️",
            WorkStatus::Archived => "📁",
            WorkStatus::Maintenance => "🔧",
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Unknown status '{}'. Expected one of: active, paused, archived, maintenance",
                    s
                )
            })
    }
}

/// Database model for a work
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Work {
    pub work_id: String,
    pub work_name: String,
    pub work_slug: String,
    pub category: String,
    pub subcategory: String,
    pub status: WorkStatus,
    pub version: String,
    pub is_latest: bool,
    pub description: String,
    pub short_description: String,
    pub image_preview_url: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub archived_date: Option<DateTime<Utc>>,
    pub streamlit_page: String,
    pub config_json: String,
    pub notes: String,
    pub tags: Vec<String>,
}

/// Input of a work insert. Required fields are plain, the rest default when `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWork {
    pub work_id: String,
    pub work_name: String,
    pub category: String,
    pub status: WorkStatus,
    pub version: String,
    pub streamlit_page: String,
    pub work_slug: Option<String>,
    pub subcategory: Option<String>,
    pub is_latest: Option<bool>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image_preview_url: Option<String>,
    pub activated_date: Option<DateTime<Utc>>,
    pub archived_date: Option<DateTime<Utc>>,
    pub config_json: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewWork {
    /// A work carrying only the required fields
    pub fn required(
        work_id: impl Into<String>,
        work_name: impl Into<String>,
        category: impl Into<String>,
        status: WorkStatus,
        version: impl Into<String>,
        streamlit_page: impl Into<String>,
    ) -> Self {
        Self {
            work_id: work_id.into(),
            work_name: work_name.into(),
            category: category.into(),
            status,
            version: version.into(),
            streamlit_page: streamlit_page.into(),
            work_slug: None,
            subcategory: None,
            is_latest: None,
            description: None,
            short_description: None,
            image_preview_url: None,
            activated_date: None,
            archived_date: None,
            config_json: None,
            notes: None,
            tags: None,
        }
    }
}
