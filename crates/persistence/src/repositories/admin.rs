//! Admin repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminEntity;
use crate::metrics::QueryTimer;

const ADMIN_COLUMNS: &str = "id, email, password_hash, name, role, is_active, deleted_at, \
                             last_login_at, created_at, updated_at";

/// Repository for admin accounts. Deleted admins are kept as rows with
/// `deleted_at` set and are invisible to every lookup here.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Creates a new AdminRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find a non-deleted admin by email (already normalized).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_email");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a non-deleted admin by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count admins that can currently sign in.
    pub async fn count_active(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_admins");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM admins WHERE is_active = true AND deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// List non-deleted admins, newest first.
    pub async fn list(&self) -> Result<Vec<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_admins");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE deleted_at IS NULL ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an admin. A duplicate email among non-deleted admins fails
    /// with a unique violation.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<AdminEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_admin");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            r#"
            INSERT INTO admins (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create the first super-admin only while no active admin exists.
    ///
    /// The check and the insert run in one statement so two concurrent
    /// setup calls cannot both succeed. Returns `None` when an active
    /// admin already exists.
    pub async fn create_if_none_active(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_first_admin");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            r#"
            INSERT INTO admins (email, password_hash, name, role)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (
                SELECT 1 FROM admins WHERE is_active = true AND deleted_at IS NULL
            )
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record a successful login.
    pub async fn update_last_login(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_admin_last_login");
        sqlx::query(
            r#"
            UPDATE admins SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Soft-delete an admin. Returns false when no live admin had that id.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_admin");
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET deleted_at = NOW(), is_active = false, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
