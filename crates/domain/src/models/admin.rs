//! Admin account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Privilege level of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "super_admin" | "super-admin" => Ok(AdminRole::SuperAdmin),
            other => Err(format!("Unknown admin role: {}", other)),
        }
    }
}

/// An admin account. Never serialized directly; see [`AdminProfile`].
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Whether this account may authenticate.
    pub fn can_authenticate(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}

/// Public view of an admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
            is_active: admin.is_active,
            last_login_at: admin.last_login_at,
            created_at: admin.created_at,
        }
    }
}

/// Request payload for admin login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request payload for creating an admin (setup or admin management).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Ignored by the setup route, which always creates a super-admin.
    #[serde(default)]
    pub role: Option<AdminRole>,
}

/// Response for the setup status probe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    pub needs_setup: bool,
}

/// Normalizes an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{faker::internet::en::SafeEmail, Fake};

    fn sample_admin() -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: SafeEmail().fake(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$salt$hash".to_string(),
            name: "Store Owner".to_string(),
            role: AdminRole::SuperAdmin,
            is_active: true,
            deleted_at: None,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [AdminRole::Admin, AdminRole::SuperAdmin] {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert_eq!(
            "super-admin".parse::<AdminRole>().unwrap(),
            AdminRole::SuperAdmin
        );
        assert!("owner".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
    }

    #[test]
    fn test_can_authenticate() {
        let mut admin = sample_admin();
        assert!(admin.can_authenticate());

        admin.deleted_at = Some(Utc::now());
        assert!(!admin.can_authenticate());

        admin.deleted_at = None;
        admin.is_active = false;
        assert!(!admin.can_authenticate());
    }

    #[test]
    fn test_profile_omits_password_hash() {
        let profile: AdminProfile = sample_admin().into();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"super_admin\""));
        assert!(json.contains("lastLoginAt"));
    }

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "owner@example.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_create_admin_request_validation() {
        let request = CreateAdminRequest {
            email: "staff@example.com".to_string(),
            password: "secret123".to_string(),
            name: String::new(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Owner@Example.COM "), "owner@example.com");
    }
}
