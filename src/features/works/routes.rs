use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::works::dtos::MAX_PREVIEW_IMAGE_SIZE;
use crate::features::works::handlers::{self, WorksState};

/// Work form routes, nested under `/api/admin`
pub fn routes(state: WorksState) -> Router {
    Router::new()
        .route(
            "/works",
            get(handlers::list_works).post(handlers::create_work).layer(
                // Image plus multipart overhead
                DefaultBodyLimit::max(MAX_PREVIEW_IMAGE_SIZE + 1024 * 1024),
            ),
        )
        .route("/works/statuses", get(handlers::list_work_statuses))
        .route(
            "/works/{id}",
            get(handlers::get_work).put(handlers::update_work),
        )
        .route("/works/{id}/archive", post(handlers::archive_work))
        .with_state(state)
}
