//! Event repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::event::{CreateEventRequest, UpdateEventRequest};

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateEventRequest) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (title, description, category_id, images, event_date,
                                location, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.category_id)
        .bind(&input.images)
        .bind(input.event_date)
        .bind(&input.location)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by id; unpublished events are hidden when `published_only`.
    pub async fn find_by_id(
        &self,
        id: Uuid,
        published_only: bool,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events WHERE id = $1 AND ($2 = false OR is_published = true)
            "#,
        )
        .bind(id)
        .bind(published_only)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List one page of events, soonest event date first.
    pub async fn list(
        &self,
        published_only: bool,
        category_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events
            WHERE ($1 = false OR is_published = true)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY event_date DESC NULLS LAST, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(published_only)
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count(
        &self,
        published_only: bool,
        category_id: Option<Uuid>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_events");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM events
            WHERE ($1 = false OR is_published = true)
              AND ($2::uuid IS NULL OR category_id = $2)
            "#,
        )
        .bind(published_only)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Update an event (partial update). None values are preserved.
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateEventRequest,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                images = COALESCE($5, images),
                event_date = COALESCE($6, event_date),
                location = COALESCE($7, location),
                is_published = COALESCE($8, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.category_id)
        .bind(&input.images)
        .bind(input.event_date)
        .bind(&input.location)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
