//! In-memory stores and router helpers for unit and handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{DateTime, Duration, Utc};

use crate::core::error::{AppError, Result};
use crate::features::auth::AdminSession;
use crate::features::categories::dtos::UpdateCategoryDto;
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryStore;
use crate::features::categories::services::CategoryService;
use crate::features::works::dtos::UpdateWorkDto;
use crate::features::works::models::{Work, WorkStatus};
use crate::features::works::repositories::WorkStore;
use crate::features::works::services::WorkService;

fn duplicate(id: &str) -> AppError {
    AppError::Conflict(format!("A record with identifier '{}' already exists", id))
}

/// Category store keeping rows in a map, counting writes
#[derive(Default)]
pub struct InMemoryCategoryStore {
    rows: Mutex<HashMap<String, Category>>,
    writes: AtomicUsize,
}

impl InMemoryCategoryStore {
    /// Number of insert/update/archive calls that reached the store
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn fetch_active(&self) -> Result<Vec<Category>> {
        let mut active: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            (a.display_order, &a.category_name).cmp(&(b.display_order, &b.category_name))
        });
        Ok(active)
    }

    async fn fetch_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        Ok(self.rows.lock().unwrap().get(category_id).cloned())
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&category.category_id) {
            return Err(duplicate(&category.category_id));
        }
        rows.insert(category.category_id.clone(), category.clone());
        Ok(())
    }

    async fn update(
        &self,
        category_id: &str,
        changes: &UpdateCategoryDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(category_id) else {
            return Ok(0);
        };

        if let Some(ref name) = changes.category_name {
            row.category_name = name.clone();
        }
        if let Some(ref icon) = changes.category_icon {
            row.category_icon = icon.clone();
        }
        if let Some(order) = changes.display_order {
            row.display_order = order;
        }
        if let Some(active) = changes.is_active {
            row.is_active = active;
        }
        row.updated_date = updated_date;
        Ok(1)
    }

    async fn set_inactive(&self, category_id: &str, updated_date: DateTime<Utc>) -> Result<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(category_id) else {
            return Ok(0);
        };

        row.is_active = false;
        row.updated_date = updated_date;
        Ok(1)
    }
}

/// Work store keeping rows in a map, counting writes
#[derive(Default)]
pub struct InMemoryWorkStore {
    rows: Mutex<HashMap<String, Work>>,
    writes: AtomicUsize,
}

impl InMemoryWorkStore {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkStore for InMemoryWorkStore {
    async fn fetch_all(&self) -> Result<Vec<Work>> {
        let mut works: Vec<Work> = self.rows.lock().unwrap().values().cloned().collect();
        works.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.created_date.cmp(&a.created_date))
        });
        Ok(works)
    }

    async fn fetch_by_id(&self, work_id: &str) -> Result<Option<Work>> {
        Ok(self.rows.lock().unwrap().get(work_id).cloned())
    }

    async fn insert(&self, work: &Work) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&work.work_id) {
            return Err(duplicate(&work.work_id));
        }
        rows.insert(work.work_id.clone(), work.clone());
        Ok(())
    }

    async fn update(
        &self,
        work_id: &str,
        changes: &UpdateWorkDto,
        updated_date: DateTime<Utc>,
    ) -> Result<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(work_id) else {
            return Ok(0);
        };

        let text_fields = [
            (&mut row.work_name, &changes.work_name),
            (&mut row.work_slug, &changes.work_slug),
            (&mut row.category, &changes.category),
            (&mut row.subcategory, &changes.subcategory),
            (&mut row.version, &changes.version),
            (&mut row.description, &changes.description),
            (&mut row.short_description, &changes.short_description),
            (&mut row.notes, &changes.notes),
            (&mut row.image_preview_url, &changes.image_preview_url),
            (&mut row.streamlit_page, &changes.streamlit_page),
            (&mut row.config_json, &changes.config_json),
        ];
        for (slot, value) in text_fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        if let Some(is_latest) = changes.is_latest {
            row.is_latest = is_latest;
        }
        if let Some(ref tags) = changes.tags {
            row.tags = tags.clone();
        }
        if let Some(at) = changes.activated_date {
            row.activated_date = Some(at);
        }
        row.updated_date = updated_date;
        Ok(1)
    }

    async fn archive(&self, work_id: &str, at: DateTime<Utc>) -> Result<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(work_id) else {
            return Ok(0);
        };

        if row.status != WorkStatus::Archived || row.archived_date.is_none() {
            row.archived_date = Some(at);
        }
        row.status = WorkStatus::Archived;
        row.updated_date = at;
        Ok(1)
    }
}

pub fn category_service() -> (CategoryService, Arc<InMemoryCategoryStore>) {
    let store = Arc::new(InMemoryCategoryStore::default());
    (CategoryService::new(store.clone()), store)
}

pub fn work_service() -> (WorkService, Arc<InMemoryWorkStore>) {
    let store = Arc::new(InMemoryWorkStore::default());
    (WorkService::new(store.clone()), store)
}

pub fn create_admin_session() -> AdminSession {
    let now = Utc::now();
    AdminSession {
        token: "test-session-token".to_string(),
        created_at: now,
        expires_at: now + Duration::hours(1),
    }
}

async fn inject_admin_session_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_session());
    next.run(request).await
}

/// Wrap a router so every request carries a live admin session
pub fn with_admin_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_session_middleware))
}
