//! Repository for Google sign-in sessions.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::AdminSessionEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct AdminSessionRepository {
    pool: PgPool,
}

impl AdminSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a session keyed by the hash of its token.
    pub async fn create(
        &self,
        token_hash: &str,
        email: &str,
        name: Option<&str>,
        picture: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Result<AdminSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_admin_session");
        let result = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            INSERT INTO admin_sessions (id, email, name, picture, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, name, picture, expires_at, created_at
            "#,
        )
        .bind(token_hash)
        .bind(email)
        .bind(name)
        .bind(picture)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(
        &self,
        token_hash: &str,
    ) -> Result<Option<AdminSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_session");
        let result = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            SELECT id, email, name, picture, expires_at, created_at
            FROM admin_sessions WHERE id = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn extend(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("extend_admin_session");
        sqlx::query("UPDATE admin_sessions SET expires_at = $2 WHERE id = $1")
            .bind(token_hash)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    pub async fn delete(&self, token_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_admin_session");
        let result = sqlx::query("DELETE FROM admin_sessions WHERE id = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Remove every expired session. Returns the number removed.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_admin_sessions");
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
