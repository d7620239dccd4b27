use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Category form routes, nested under `/api/admin`
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/icons", get(handlers::list_category_icons))
        .route(
            "/categories/{id}",
            get(handlers::get_category).put(handlers::update_category),
        )
        .route("/categories/{id}/archive", post(handlers::archive_category))
        .with_state(service)
}
