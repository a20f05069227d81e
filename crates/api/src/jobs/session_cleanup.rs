//! Removes expired Google sign-in sessions.
//!
//! Lookups already delete the expired session they hit; this sweeps the
//! ones nobody comes back for.

use persistence::repositories::AdminSessionRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

pub struct SessionCleanupJob {
    sessions: AdminSessionRepository,
}

impl SessionCleanupJob {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sessions: AdminSessionRepository::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl Job for SessionCleanupJob {
    fn name(&self) -> &'static str {
        "session_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let deleted = self
            .sessions
            .delete_expired()
            .await
            .map_err(|e| format!("Failed to delete expired sessions: {}", e))?;

        if deleted > 0 {
            info!(deleted, "Expired admin sessions removed");
        }
        Ok(())
    }
}
