use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::UpdateCategoryDto;
use crate::features::categories::models::Category;
use crate::shared::update_builder::build_update;

const CATEGORY_COLUMNS: &str =
    "category_id, category_name, category_icon, display_order, is_active, created_date, updated_date";

/// Row-level access to the categories table
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Active categories ordered by `(display_order, category_name)`
    async fn fetch_active(&self) -> Result<Vec<Category>>;

    async fn fetch_by_id(&self, category_id: &str) -> Result<Option<Category>>;

    async fn insert(&self, category: &Category) -> Result<()>;

    /// Apply the supplied fields and stamp `updated_date`. Returns affected rows.
    async fn update(
        &self,
        category_id: &str,
        changes: &UpdateCategoryDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64>;

    /// Set `is_active = false` and stamp `updated_date`. Returns affected rows.
    async fn set_inactive(&self, category_id: &str, updated_date: DateTime<Utc>) -> Result<u64>;
}

/// PostgreSQL-backed category store
pub struct PgCategoryStore {
    pool: PgPool,
    table: String,
}

impl PgCategoryStore {
    /// `table` must be a validated, quoted table reference (see `WarehouseConfig::categories_ref`)
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn fetch_active(&self) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM {}
            WHERE is_active = TRUE
            ORDER BY display_order, category_name
            "#,
            CATEGORY_COLUMNS, self.table
        );

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn fetch_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM {}
            WHERE category_id = $1
            LIMIT 1
            "#,
            CATEGORY_COLUMNS, self.table
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category '{}': {:?}", category_id, e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        let query = format!(
            r#"
            INSERT INTO {} ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            self.table, CATEGORY_COLUMNS
        );

        sqlx::query(&query)
            .bind(&category.category_id)
            .bind(&category.category_name)
            .bind(&category.category_icon)
            .bind(category.display_order)
            .bind(category.is_active)
            .bind(category.created_date)
            .bind(category.updated_date)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category '{}': {:?}", category.category_id, e);
                handle_db_error(e)
            })?;

        Ok(())
    }

    async fn update(
        &self,
        category_id: &str,
        changes: &UpdateCategoryDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64> {
        let mut builder = build_update(
            &self.table,
            changes.assignments(),
            "category_id",
            category_id,
            updated_date,
        );

        let result = builder.build().execute(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to update category '{}': {:?}", category_id, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn set_inactive(&self, category_id: &str, updated_date: DateTime<Utc>) -> Result<u64> {
        let query = format!(
            r#"
            UPDATE {}
            SET is_active = FALSE, updated_date = $1
            WHERE category_id = $2
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(updated_date)
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to archive category '{}': {:?}", category_id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }
}
