//! Google sign-in sessions.
//!
//! The browser holds an opaque random token; the database stores only its
//! SHA-256 hex digest, so a leaked sessions table cannot be replayed.

use chrono::{DateTime, Duration, Utc};
use persistence::entities::AdminSessionEntity;
use persistence::repositories::AdminSessionRepository;
use shared::crypto::{generate_token, sha256_hex};

/// Sessions live for 30 days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// A session used with less than this left is pushed out to a full TTL.
pub const SESSION_REFRESH_THRESHOLD_DAYS: i64 = 15;

const SESSION_TOKEN_BYTES: usize = 32;

/// Identity carried by a Google sign-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSessionEntity> for SessionUser {
    fn from(entity: AdminSessionEntity) -> Self {
        Self {
            email: entity.email,
            name: entity.name,
            picture: entity.picture,
            expires_at: entity.expires_at,
        }
    }
}

/// Whether a session expiring at `expires_at` should be extended when used at `now`.
pub fn needs_extension(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at - now < Duration::days(SESSION_REFRESH_THRESHOLD_DAYS)
}

#[derive(Clone)]
pub struct SessionService {
    sessions: AdminSessionRepository,
}

impl SessionService {
    pub fn new(sessions: AdminSessionRepository) -> Self {
        Self { sessions }
    }

    /// Creates a session and returns the raw token for the cookie.
    pub async fn create(
        &self,
        email: &str,
        name: Option<&str>,
        picture: Option<&str>,
    ) -> Result<String, sqlx::Error> {
        let token = generate_token(SESSION_TOKEN_BYTES);
        let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
        self.sessions
            .create(&sha256_hex(&token), email, name, picture, expires_at)
            .await?;
        Ok(token)
    }

    /// Looks up a session by raw token.
    ///
    /// Expired sessions are deleted and reported as absent. Sessions close
    /// to expiry are extended to a full TTL.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
        let id = sha256_hex(token);
        let Some(mut session) = self.sessions.find_by_id(&id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.is_expired(now) {
            self.sessions.delete(&id).await?;
            tracing::debug!("Deleted expired admin session on lookup");
            return Ok(None);
        }

        if needs_extension(session.expires_at, now) {
            let expires_at = now + Duration::days(SESSION_TTL_DAYS);
            self.sessions.extend(&id, expires_at).await?;
            session.expires_at = expires_at;
        }

        Ok(Some(session.into()))
    }

    pub async fn revoke(&self, token: &str) -> Result<(), sqlx::Error> {
        self.sessions.delete(&sha256_hex(token)).await?;
        Ok(())
    }
}
