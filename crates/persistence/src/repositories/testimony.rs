//! Testimony repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::testimony::{CreateTestimonyRequest, UpdateTestimonyRequest};

use crate::entities::TestimonyEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct TestimonyRepository {
    pool: PgPool,
}

impl TestimonyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: &CreateTestimonyRequest,
    ) -> Result<TestimonyEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_testimony");
        let result = sqlx::query_as::<_, TestimonyEntity>(
            r#"
            INSERT INTO testimonies (customer_name, message, rating, avatar_url, is_visible)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.customer_name)
        .bind(&input.message)
        .bind(input.rating)
        .bind(&input.avatar_url)
        .bind(input.is_visible)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list(&self, visible_only: bool) -> Result<Vec<TestimonyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_testimonies");
        let result = sqlx::query_as::<_, TestimonyEntity>(
            r#"
            SELECT * FROM testimonies
            WHERE ($1 = false OR is_visible = true)
            ORDER BY created_at DESC
            "#,
        )
        .bind(visible_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateTestimonyRequest,
    ) -> Result<Option<TestimonyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_testimony");
        let result = sqlx::query_as::<_, TestimonyEntity>(
            r#"
            UPDATE testimonies SET
                customer_name = COALESCE($2, customer_name),
                message = COALESCE($3, message),
                rating = COALESCE($4, rating),
                avatar_url = COALESCE($5, avatar_url),
                is_visible = COALESCE($6, is_visible),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.customer_name)
        .bind(&input.message)
        .bind(input.rating)
        .bind(&input.avatar_url)
        .bind(input.is_visible)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_testimony");
        let result = sqlx::query("DELETE FROM testimonies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
