//! Setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::setting::Setting;

/// Database row mapping for the settings table.
#[derive(Debug, Clone, FromRow)]
pub struct SettingEntity {
    pub key: String,
    pub value: String,
    pub category: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SettingEntity> for Setting {
    fn from(entity: SettingEntity) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
            category: entity.category,
            description: entity.description,
            updated_at: entity.updated_at,
        }
    }
}
