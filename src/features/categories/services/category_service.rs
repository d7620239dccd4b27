use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::UpdateCategoryDto;
use crate::features::categories::models::{Category, NewCategory};
use crate::features::categories::repositories::CategoryStore;
use crate::shared::constants::{
    is_known_icon, CATEGORY_ICONS, DEFAULT_CATEGORY_ICON, DEFAULT_DISPLAY_ORDER,
};

fn validate_icon(icon: &str) -> Result<()> {
    if is_known_icon(icon) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Icon '{}' is not available. Choose one of: {}",
            icon,
            CATEGORY_ICONS.join(" ")
        )))
    }
}

fn validate_display_order(order: i32) -> Result<()> {
    if order < 1 {
        return Err(AppError::Validation(
            "Display order must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// List all active categories, ordered for selection lists
    pub async fn list_active(&self) -> Result<Vec<Category>> {
        self.store.fetch_active().await
    }

    /// Get a category by ID. Absence is `Ok(None)`, not an error.
    pub async fn get(&self, category_id: &str) -> Result<Option<Category>> {
        self.store.fetch_by_id(category_id).await
    }

    /// Create a category, applying defaults and server-side timestamps
    pub async fn create(&self, data: NewCategory) -> Result<Category> {
        if data.category_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Category name is required".to_string(),
            ));
        }

        let category_icon = data
            .category_icon
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string());
        validate_icon(&category_icon)?;

        let display_order = data.display_order.unwrap_or(DEFAULT_DISPLAY_ORDER);
        validate_display_order(display_order)?;

        let now = Utc::now();
        let category = Category {
            category_id: data.category_id,
            category_name: data.category_name,
            category_icon,
            display_order,
            is_active: true,
            created_date: now,
            updated_date: now,
        };

        self.store.insert(&category).await?;

        tracing::info!(
            "Category '{}' created with id {}",
            category.category_name,
            category.category_id
        );
        Ok(category)
    }

    /// Update the supplied fields of a category and stamp `updated_date`.
    ///
    /// An empty change set is still a successful update of the timestamp.
    pub async fn update(&self, category_id: &str, changes: UpdateCategoryDto) -> Result<Category> {
        if let Some(ref name) = changes.category_name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Category name must not be empty".to_string(),
                ));
            }
        }
        if let Some(ref icon) = changes.category_icon {
            validate_icon(icon)?;
        }
        if let Some(order) = changes.display_order {
            validate_display_order(order)?;
        }

        let affected = self
            .store
            .update(category_id, &changes, Utc::now())
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!(
                "Category '{}' not found",
                category_id
            )));
        }

        tracing::info!("Category '{}' updated", category_id);

        self.store
            .fetch_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", category_id)))
    }

    /// Archive (soft delete) a category. Archiving twice is a no-op success.
    pub async fn archive(&self, category_id: &str) -> Result<()> {
        let affected = self.store.set_inactive(category_id, Utc::now()).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!(
                "Category '{}' not found",
                category_id
            )));
        }

        tracing::info!("Category '{}' archived", category_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category_service, InMemoryCategoryStore};
    use std::time::Duration;

    fn new_category(id: &str, name: &str) -> NewCategory {
        NewCategory {
            category_id: id.to_string(),
            category_name: name.to_string(),
            category_icon: None,
            display_order: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (service, _store) = category_service();

        service
            .create(new_category("sales_20250101000000", "Sales"))
            .await
            .unwrap();

        let stored = service.get("sales_20250101000000").await.unwrap().unwrap();
        assert_eq!(stored.category_icon, "📊");
        assert_eq!(stored.display_order, 999);
        assert!(stored.is_active);
        assert_eq!(stored.created_date, stored.updated_date);
    }

    #[tokio::test]
    async fn test_call_analysis_scenario() {
        let (service, _store) = category_service();

        service
            .create(NewCategory {
                category_id: "call_analysis_20250101000000".to_string(),
                category_name: "Call Analysis".to_string(),
                category_icon: Some("📞".to_string()),
                display_order: Some(1),
            })
            .await
            .unwrap();

        let active = service.list_active().await.unwrap();
        let matching: Vec<_> = active
            .iter()
            .filter(|c| c.category_name == "Call Analysis")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].display_order, 1);
        assert!(matching[0].is_active);
    }

    #[tokio::test]
    async fn test_list_active_orders_and_excludes_archived() {
        let (service, _store) = category_service();

        for (id, name, order) in [
            ("b_1", "Beta", 2),
            ("a_1", "Alpha", 2),
            ("z_1", "Zulu", 1),
            ("x_1", "Gone", 1),
        ] {
            service
                .create(NewCategory {
                    category_id: id.to_string(),
                    category_name: name.to_string(),
                    category_icon: None,
                    display_order: Some(order),
                })
                .await
                .unwrap();
        }
        service.archive("x_1").await.unwrap();

        let names: Vec<_> = service
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.category_name)
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_list_active_empty() {
        let (service, _store) = category_service();
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (service, _store) = category_service();
        assert!(service.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_icon_without_store_call() {
        let (service, store) = category_service();

        let result = service
            .create(NewCategory {
                category_icon: Some("🦀".to_string()),
                ..new_category("crab_1", "Crab")
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_without_store_call() {
        let (service, store) = category_service();

        let result = service.create(new_category("x_1", "   ")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.write_count(), 0);
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_a_conflict() {
        let (service, _store) = category_service();

        service.create(new_category("dup_1", "Dup")).await.unwrap();
        let result = service.create(new_category("dup_1", "Dup")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_changes_fields_and_keeps_id() {
        let (service, _store) = category_service();
        service.create(new_category("ops_1", "Ops")).await.unwrap();

        let updated = service
            .update(
                "ops_1",
                UpdateCategoryDto {
                    category_name: Some("Operations".to_string()),
                    category_icon: Some("🔧".to_string()),
                    display_order: Some(5),
                    is_active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category_id, "ops_1");
        assert_eq!(updated.category_name, "Operations");
        assert_eq!(updated.category_icon, "🔧");
        assert_eq!(updated.display_order, 5);
    }

    #[tokio::test]
    async fn test_empty_update_still_stamps_updated_date() {
        let (service, _store) = category_service();
        let created = service.create(new_category("hr_1", "HR")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = service
            .update("hr_1", UpdateCategoryDto::default())
            .await
            .unwrap();

        assert!(updated.updated_date > created.updated_date);
        assert_eq!(updated.created_date, created.created_date);
        assert_eq!(updated.category_name, created.category_name);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, _store) = category_service();
        let result = service
            .update("missing", UpdateCategoryDto::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_values() {
        let (service, store) = category_service();
        service.create(new_category("fin_1", "Finance")).await.unwrap();
        let writes = store.write_count();

        let result = service
            .update(
                "fin_1",
                UpdateCategoryDto {
                    display_order: Some(0),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.write_count(), writes);
    }

    #[tokio::test]
    async fn test_archive_is_idempotent() {
        let (service, _store) = category_service();
        service.create(new_category("old_1", "Old")).await.unwrap();

        service.archive("old_1").await.unwrap();
        service.archive("old_1").await.unwrap();

        let stored = service.get("old_1").await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archive_missing_is_not_found() {
        let store = Arc::new(InMemoryCategoryStore::default());
        let service = CategoryService::new(store);
        assert!(matches!(
            service.archive("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
