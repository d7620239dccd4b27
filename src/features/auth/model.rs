use chrono::{DateTime, Utc};

/// A logged-in admin, resolved from a bearer token by `require_admin_session`
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
