//! Product repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::product::BulkUpdateResult;

use crate::entities::ProductEntity;
use crate::metrics::QueryTimer;

const PRODUCT_COLUMNS: &str = "id, name, slug, description, category, mrp, offer_percentage, \
                               offer_price, images, is_customizable, customization_note, \
                               is_visible, is_featured, created_at, updated_at";

/// Column values for inserting or fully replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub mrp: i64,
    pub offer_percentage: i32,
    pub offer_price: i64,
    pub images: Vec<String>,
    pub is_customizable: bool,
    pub customization_note: Option<String>,
    pub is_visible: bool,
    pub is_featured: bool,
}

/// Filters for product listings. `None` means "do not filter".
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub visible_only: bool,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

impl ProductFilter {
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")))
    }
}

const FILTER_CLAUSE: &str = r#"
    ($1 = false OR is_visible = true)
    AND ($2::text IS NULL OR category = $2)
    AND ($3::bool IS NULL OR is_featured = $3)
    AND ($4::text IS NULL OR name ILIKE $4 OR description ILIKE $4)
"#;

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create(&self, input: &ProductInput) -> Result<ProductEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_product");
        let result = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"
            INSERT INTO products (name, slug, description, category, mrp, offer_percentage,
                                  offer_price, images, is_customizable, customization_note,
                                  is_visible, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.mrp)
        .bind(input.offer_percentage)
        .bind(input.offer_price)
        .bind(&input.images)
        .bind(input.is_customizable)
        .bind(&input.customization_note)
        .bind(input.is_visible)
        .bind(input.is_featured)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_product_by_id");
        let result = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch every product whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProductEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_products_by_ids");
        let result = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List one page of products matching `filter`, featured first then newest.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_products");
        let result = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE {FILTER_CLAUSE}
            ORDER BY is_featured DESC, created_at DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(filter.visible_only)
        .bind(&filter.category)
        .bind(filter.featured)
        .bind(filter.search_pattern())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count products matching `filter`.
    pub async fn count(&self, filter: &ProductFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_products");
        let count: (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM products WHERE {FILTER_CLAUSE}"))
                .bind(filter.visible_only)
                .bind(&filter.category)
                .bind(filter.featured)
                .bind(filter.search_pattern())
                .fetch_one(&self.pool)
                .await?;
        timer.record();
        Ok(count.0)
    }

    /// Replace every column of a product. Returns `None` if it does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: &ProductInput,
    ) -> Result<Option<ProductEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_product");
        let result = sqlx::query_as::<_, ProductEntity>(&format!(
            r#"
            UPDATE products SET
                name = $2,
                slug = $3,
                description = $4,
                category = $5,
                mrp = $6,
                offer_percentage = $7,
                offer_price = $8,
                images = $9,
                is_customizable = $10,
                customization_note = $11,
                is_visible = $12,
                is_featured = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.mrp)
        .bind(input.offer_percentage)
        .bind(input.offer_price)
        .bind(&input.images)
        .bind(input.is_customizable)
        .bind(&input.customization_note)
        .bind(input.is_visible)
        .bind(input.is_featured)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set visibility on one product. Returns false if it does not exist.
    pub async fn set_visibility(&self, id: Uuid, is_visible: bool) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("set_product_visibility");
        let result = sqlx::query(
            r#"
            UPDATE products SET is_visible = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_visible)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Set visibility on each id independently. A failure on one id does
    /// not roll back the others; it is reported in `failed`.
    pub async fn bulk_set_visibility(&self, ids: &[Uuid], is_visible: bool) -> BulkUpdateResult {
        let mut outcome = BulkUpdateResult::default();
        for &id in ids {
            match self.set_visibility(id, is_visible).await {
                Ok(true) => outcome.updated.push(id),
                Ok(false) => outcome.failed.push(id),
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "Bulk visibility update failed");
                    outcome.failed.push(id);
                }
            }
        }
        outcome
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_product");
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
