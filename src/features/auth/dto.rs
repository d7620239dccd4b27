use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AdminSession;

/// Request DTO for admin login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for admin login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Session token, sent back as `Authorization: Bearer <token>`
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for LoginResponseDto {
    fn from(session: AdminSession) -> Self {
        Self {
            access_token: session.token,
            token_type: "Bearer".to_string(),
            expires_at: session.expires_at,
        }
    }
}

/// Current admin session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for SessionDto {
    fn from(session: AdminSession) -> Self {
        Self {
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }
}
