//! Google sign-in session entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the admin_sessions table.
///
/// `id` is the SHA-256 hex digest of the session token; the raw token
/// only ever lives in the client cookie.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSessionEntity {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AdminSessionEntity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
