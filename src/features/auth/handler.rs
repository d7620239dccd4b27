use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dto::{LoginRequestDto, LoginResponseDto, SessionDto};
use crate::features::auth::model::AdminSession;
use crate::features::auth::service::SessionService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with the shared admin password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(&dto.password).await?;
    Ok(Json(ApiResponse::success(
        Some(session.into()),
        Some("Logged in".to_string()),
        None,
    )))
}

/// Close the current admin session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    session: AdminSession,
    State(service): State<Arc<SessionService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(&session.token).await;
    Ok(Json(ApiResponse::success(
        None,
        Some("Logged out".to_string()),
        None,
    )))
}

/// Get the current admin session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session is live", body = ApiResponse<SessionDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(session: AdminSession) -> Result<Json<ApiResponse<SessionDto>>> {
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::core::config::AdminConfig;
    use crate::core::middleware::require_admin_session;
    use crate::features::auth::routes;
    use crate::features::auth::service::SessionService;
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let sessions = Arc::new(SessionService::new(&AdminConfig {
            password: "letmein".to_string(),
            session_ttl: std::time::Duration::from_secs(300),
        }));

        let protected = routes::protected_routes(Arc::clone(&sessions)).route_layer(
            axum::middleware::from_fn_with_state(Arc::clone(&sessions), require_admin_session),
        );
        let app = Router::new()
            .merge(routes::public_routes(sessions))
            .merge(protected);

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_login_session_logout() {
        let server = server();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "password": "letmein" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["token_type"], "Bearer");

        let response = server
            .get("/api/auth/session")
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server
            .post("/api/auth/logout")
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server
            .get("/api/auth/session")
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let server = server();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "password": "guess" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "password": "" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
