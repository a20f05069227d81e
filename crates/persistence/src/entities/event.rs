//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::event::Event;

#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            category_id: entity.category_id,
            images: entity.images,
            event_date: entity.event_date,
            location: entity.location,
            is_published: entity.is_published,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
