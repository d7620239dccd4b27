use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::works::dtos::UpdateWorkDto;
use crate::features::works::models::{Work, WorkStatus};
use crate::shared::update_builder::build_update;

const WORK_COLUMNS: &str = "work_id, work_name, work_slug, category, subcategory, status, \
     version, is_latest, description, short_description, image_preview_url, created_date, \
     updated_date, activated_date, archived_date, streamlit_page, config_json, notes, tags";

/// Row-level access to the works table
#[async_trait]
pub trait WorkStore: Send + Sync {
    /// Every work regardless of status, ordered by category then newest first
    async fn fetch_all(&self) -> Result<Vec<Work>>;

    async fn fetch_by_id(&self, work_id: &str) -> Result<Option<Work>>;

    async fn insert(&self, work: &Work) -> Result<()>;

    /// Apply the supplied fields and stamp `updated_date`. Returns affected rows.
    async fn update(
        &self,
        work_id: &str,
        changes: &UpdateWorkDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64>;

    /// Set status to archived. An existing `archived_date` is kept. Returns affected rows.
    async fn archive(&self, work_id: &str, at: DateTime<Utc>) -> Result<u64>;
}

/// PostgreSQL-backed work store
pub struct PgWorkStore {
    pool: PgPool,
    table: String,
}

impl PgWorkStore {
    /// `table` must be a validated, quoted table reference (see `WarehouseConfig::works_ref`)
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl WorkStore for PgWorkStore {
    async fn fetch_all(&self) -> Result<Vec<Work>> {
        let query = format!(
            r#"
            SELECT {}
            FROM {}
            ORDER BY category, created_date DESC
            "#,
            WORK_COLUMNS, self.table
        );

        sqlx::query_as::<_, Work>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list works: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn fetch_by_id(&self, work_id: &str) -> Result<Option<Work>> {
        let query = format!(
            r#"
            SELECT {}
            FROM {}
            WHERE work_id = $1
            LIMIT 1
            "#,
            WORK_COLUMNS, self.table
        );

        sqlx::query_as::<_, Work>(&query)
            .bind(work_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get work '{}': {:?}", work_id, e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, work: &Work) -> Result<()> {
        let query = format!(
            r#"
            INSERT INTO {} ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
            self.table, WORK_COLUMNS
        );

        sqlx::query(&query)
            .bind(&work.work_id)
            .bind(&work.work_name)
            .bind(&work.work_slug)
            .bind(&work.category)
            .bind(&work.subcategory)
            .bind(work.status)
            .bind(&work.version)
            .bind(work.is_latest)
            .bind(&work.description)
            .bind(&work.short_description)
            .bind(&work.image_preview_url)
            .bind(work.created_date)
            .bind(work.updated_date)
            .bind(work.activated_date)
            .bind(work.archived_date)
            .bind(&work.streamlit_page)
            .bind(&work.config_json)
            .bind(&work.notes)
            .bind(&work.tags)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create work '{}': {:?}", work.work_id, e);
                handle_db_error(e)
            })?;

        Ok(())
    }

    async fn update(
        &self,
        work_id: &str,
        changes: &UpdateWorkDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64> {
        let mut builder = build_update(
            &self.table,
            changes.assignments(),
            "work_id",
            work_id,
            updated_date,
        );

        let result = builder.build().execute(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to update work '{}': {:?}", work_id, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn archive(&self, work_id: &str, at: DateTime<Utc>) -> Result<u64> {
        let query = format!(
            r#"
            UPDATE {}
            SET status = $1,
                archived_date = CASE
                    WHEN status = $1 AND archived_date IS NOT NULL THEN archived_date
                    ELSE $2
                END,
                updated_date = $2
            WHERE work_id = $3
            "#,
            self.table
        );

        let result = sqlx::query(&query)
            .bind(WorkStatus::Archived)
            .bind(at)
            .bind(work_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to archive work '{}': {:?}", work_id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }
}
