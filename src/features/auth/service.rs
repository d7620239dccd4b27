use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::AdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AdminSession;

const DEFAULT_SESSION_TTL_HOURS: i64 = 8;

/// Shared-password login and the registry of live admin sessions
pub struct SessionService {
    password_digest: [u8; 32],
    ttl: Duration,
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl SessionService {
    pub fn new(config: &AdminConfig) -> Self {
        let ttl = Duration::from_std(config.session_ttl)
            .unwrap_or_else(|_| Duration::hours(DEFAULT_SESSION_TTL_HOURS));

        Self {
            password_digest: digest(&config.password),
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session if `password` matches the configured admin password
    pub async fn login(&self, password: &str) -> Result<AdminSession> {
        self.login_at(password, Utc::now()).await
    }

    pub async fn login_at(&self, password: &str, now: DateTime<Utc>) -> Result<AdminSession> {
        if digest(password) != self.password_digest {
            tracing::warn!("Admin login rejected: invalid password");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        tracing::info!("Admin session opened, expires at {}", session.expires_at);
        Ok(session)
    }

    /// Look up a live session. Expired sessions are dropped on the way.
    pub async fn resolve(&self, token: &str) -> Result<AdminSession> {
        self.resolve_at(token, Utc::now()).await
    }

    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<AdminSession> {
        let session = self.sessions.read().await.get(token).cloned();

        match session {
            Some(session) if !session.is_expired_at(now) => Ok(session),
            Some(_) => {
                self.sessions.write().await.remove(token);
                tracing::info!("Admin session expired");
                Err(AppError::Unauthorized("Session expired".to_string()))
            }
            None => Err(AppError::Unauthorized(
                "Invalid or unknown session".to_string(),
            )),
        }
    }

    /// Close a session. Returns whether it was still registered.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token).is_some();
        if removed {
            tracing::info!("Admin session closed");
        }
        removed
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl_secs: u64) -> SessionService {
        SessionService::new(&AdminConfig {
            password: "s3cret".to_string(),
            session_ttl: std::time::Duration::from_secs(ttl_secs),
        })
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let service = service(60);
        assert!(matches!(
            service.login("nope").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let service = service(60);

        let session = service.login("s3cret").await.unwrap();
        assert_eq!(session.expires_at - session.created_at, Duration::seconds(60));

        let resolved = service.resolve(&session.token).await.unwrap();
        assert_eq!(resolved, session);

        assert!(service.logout(&session.token).await);
        assert!(!service.logout(&session.token).await);
        assert!(service.resolve(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let service = service(60);
        let now = Utc::now();

        let session = service.login_at("s3cret", now).await.unwrap();
        let later = now + Duration::seconds(61);

        assert!(matches!(
            service.resolve_at(&session.token, later).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(!service.logout(&session.token).await);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let service = service(60);
        let a = service.login("s3cret").await.unwrap();
        let b = service.login("s3cret").await.unwrap();
        assert_ne!(a.token, b.token);
    }
}
