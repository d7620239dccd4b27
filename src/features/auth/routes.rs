use crate::features::auth::handler;
use crate::features::auth::service::SessionService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .with_state(service)
}

/// Auth routes that act on the caller's session
pub fn protected_routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/session", get(handler::get_session))
        .with_state(service)
}
