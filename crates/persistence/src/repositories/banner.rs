//! Banner repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::banner::{CreateBannerRequest, UpdateBannerRequest};

use crate::entities::BannerEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct BannerRepository {
    pool: PgPool,
}

impl BannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateBannerRequest) -> Result<BannerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_banner");
        let result = sqlx::query_as::<_, BannerEntity>(
            r#"
            INSERT INTO banners (title, subtitle, image_url, link_url, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List banners by sort order. Inactive banners are included only
    /// when `active_only` is false.
    pub async fn list(&self, active_only: bool) -> Result<Vec<BannerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_banners");
        let result = sqlx::query_as::<_, BannerEntity>(
            r#"
            SELECT * FROM banners
            WHERE ($1 = false OR is_active = true)
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a banner (partial update). None values are preserved.
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateBannerRequest,
    ) -> Result<Option<BannerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_banner");
        let result = sqlx::query_as::<_, BannerEntity>(
            r#"
            UPDATE banners SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                image_url = COALESCE($4, image_url),
                link_url = COALESCE($5, link_url),
                sort_order = COALESCE($6, sort_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_banner");
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
