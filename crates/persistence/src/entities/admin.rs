//! Admin entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::admin::{Admin, AdminRole};

/// Database row mapping for the admins table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminEntity> for Admin {
    fn from(entity: AdminEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            // The column is CHECK-constrained; unknown values get the lesser role.
            role: entity.role.parse().unwrap_or(AdminRole::Admin),
            is_active: entity.is_active,
            deleted_at: entity.deleted_at,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
