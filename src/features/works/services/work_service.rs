use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::works::dtos::UpdateWorkDto;
use crate::features::works::models::{NewWork, Work};
use crate::features::works::repositories::WorkStore;
use crate::shared::constants::DEFAULT_CONFIG_JSON;

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Service for work operations
pub struct WorkService {
    store: Arc<dyn WorkStore>,
}

impl WorkService {
    pub fn new(store: Arc<dyn WorkStore>) -> Self {
        Self { store }
    }

    /// List every work, archived ones included
    pub async fn list_all(&self) -> Result<Vec<Work>> {
        self.store.fetch_all().await
    }

    pub async fn get(&self, work_id: &str) -> Result<Option<Work>> {
        self.store.fetch_by_id(work_id).await
    }

    /// Create a work. Optional fields fall back to their column defaults.
    pub async fn create(&self, data: NewWork) -> Result<Work> {
        require(&data.work_id, "Work id")?;
        require(&data.work_name, "Work name")?;
        require(&data.category, "Category")?;
        require(&data.version, "Version")?;
        require(&data.streamlit_page, "Page path")?;

        let now = Utc::now();
        let work = Work {
            work_slug: data.work_slug.unwrap_or_else(|| data.work_id.clone()),
            work_id: data.work_id,
            work_name: data.work_name,
            category: data.category,
            subcategory: data.subcategory.unwrap_or_default(),
            status: data.status,
            version: data.version,
            is_latest: data.is_latest.unwrap_or(true),
            description: data.description.unwrap_or_default(),
            short_description: data.short_description.unwrap_or_default(),
            image_preview_url: data.image_preview_url.unwrap_or_default(),
            created_date: now,
            updated_date: now,
            activated_date: data.activated_date,
            archived_date: data.archived_date,
            streamlit_page: data.streamlit_page,
            config_json: data
                .config_json
                .unwrap_or_else(|| DEFAULT_CONFIG_JSON.to_string()),
            notes: data.notes.unwrap_or_default(),
            tags: data.tags.unwrap_or_default(),
        };

        self.store.insert(&work).await?;

        tracing::info!("Work '{}' created with id {}", work.work_name, work.work_id);
        Ok(work)
    }

    /// Update the supplied fields of a work and stamp `updated_date`
    pub async fn update(&self, work_id: &str, changes: UpdateWorkDto) -> Result<Work> {
        for (value, field) in [
            (&changes.work_name, "Work name"),
            (&changes.category, "Category"),
            (&changes.version, "Version"),
            (&changes.streamlit_page, "Page path"),
        ] {
            if let Some(value) = value {
                require(value, field)?;
            }
        }

        let affected = self.store.update(work_id, &changes, Utc::now()).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Work '{}' not found", work_id)));
        }

        tracing::info!("Work '{}' updated", work_id);

        self.store
            .fetch_by_id(work_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work '{}' not found", work_id)))
    }

    /// Archive a work. Re-archiving keeps the original `archived_date`.
    pub async fn archive(&self, work_id: &str) -> Result<()> {
        let affected = self.store.archive(work_id, Utc::now()).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Work '{}' not found", work_id)));
        }

        tracing::info!("Work '{}' archived", work_id);
        Ok(())
    }
}
