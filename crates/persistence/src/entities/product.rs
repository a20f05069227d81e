//! Product entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::product::Product;

/// Database row mapping for the products table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub mrp: i64,
    pub offer_percentage: i32,
    pub offer_price: i64,
    pub images: Vec<String>, // TEXT[]
    pub is_customizable: bool,
    pub customization_note: Option<String>,
    pub is_visible: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductEntity> for Product {
    fn from(entity: ProductEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            category: entity.category,
            mrp: entity.mrp,
            offer_percentage: entity.offer_percentage,
            offer_price: entity.offer_price,
            images: entity.images,
            is_customizable: entity.is_customizable,
            customization_note: entity.customization_note,
            is_visible: entity.is_visible,
            is_featured: entity.is_featured,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
