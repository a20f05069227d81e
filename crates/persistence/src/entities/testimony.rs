//! Testimony entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::testimony::Testimony;

#[derive(Debug, Clone, FromRow)]
pub struct TestimonyEntity {
    pub id: Uuid,
    pub customer_name: String,
    pub message: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TestimonyEntity> for Testimony {
    fn from(entity: TestimonyEntity) -> Self {
        Self {
            id: entity.id,
            customer_name: entity.customer_name,
            message: entity.message,
            rating: entity.rating,
            avatar_url: entity.avatar_url,
            is_visible: entity.is_visible,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
