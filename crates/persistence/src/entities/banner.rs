//! Banner entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::banner::Banner;

#[derive(Debug, Clone, FromRow)]
pub struct BannerEntity {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BannerEntity> for Banner {
    fn from(entity: BannerEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            subtitle: entity.subtitle,
            image_url: entity.image_url,
            link_url: entity.link_url,
            sort_order: entity.sort_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
