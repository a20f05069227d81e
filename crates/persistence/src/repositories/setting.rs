//! Setting repository for database operations.

use sqlx::PgPool;

use crate::entities::SettingEntity;
use crate::metrics::QueryTimer;

/// Repository for key/value store settings.
#[derive(Clone)]
pub struct SettingRepository {
    pool: PgPool,
}

impl SettingRepository {
    /// Creates a new SettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List settings, optionally restricted to one category.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<SettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_settings");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            SELECT key, value, category, description, updated_at
            FROM settings
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY category, key
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<SettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_setting_by_key");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            SELECT key, value, category, description, updated_at
            FROM settings WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert or replace a setting by key.
    pub async fn upsert(
        &self,
        key: &str,
        value: &str,
        category: &str,
        description: Option<&str>,
    ) -> Result<SettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_setting");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            INSERT INTO settings (key, value, category, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (key) DO UPDATE SET
                value = EXCLUDED.value,
                category = EXCLUDED.category,
                description = COALESCE(EXCLUDED.description, settings.description),
                updated_at = NOW()
            RETURNING key, value, category, description, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(category)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a setting, returning the removed row so callers know its category.
    pub async fn delete(&self, key: &str) -> Result<Option<SettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_setting");
        let result = sqlx::query_as::<_, SettingEntity>(
            r#"
            DELETE FROM settings WHERE key = $1
            RETURNING key, value, category, description, updated_at
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
