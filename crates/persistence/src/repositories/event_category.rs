//! Event category repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventCategoryEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct EventCategoryRepository {
    pool: PgPool,
}

impl EventCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<EventCategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event_category");
        let result = sqlx::query_as::<_, EventCategoryEntity>(
            r#"
            INSERT INTO event_categories (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_category_by_id");
        let result =
            sqlx::query_as::<_, EventCategoryEntity>("SELECT * FROM event_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await;
        timer.record();
        result
    }

    pub async fn list(&self) -> Result<Vec<EventCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_categories");
        let result = sqlx::query_as::<_, EventCategoryEntity>(
            "SELECT * FROM event_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<EventCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event_category");
        let result = sqlx::query_as::<_, EventCategoryEntity>(
            r#"
            UPDATE event_categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of events filed under a category.
    pub async fn count_events(&self, id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_events_in_category");
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE category_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        timer.record();
        Ok(count.0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_category");
        let result = sqlx::query("DELETE FROM event_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
