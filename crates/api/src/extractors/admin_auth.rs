//! Authenticated admin extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::admin::Admin;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::admin_auth::authenticate;

/// How the current admin proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Signed `admin-token` cookie or bearer header.
    Token,
    /// Google sign-in session cookie.
    GoogleSession,
}

/// The admin behind the current request.
///
/// `require_admin` stores this in request extensions; handlers outside
/// the admin router authenticate on demand.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin: Admin,
    pub method: AuthMethod,
}

impl AdminAuth {
    pub fn require_super_admin(&self) -> Result<(), ApiError> {
        if self.admin.is_super_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Super admin access required".into()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<AdminAuth>() {
            return Ok(auth.clone());
        }
        authenticate(state, &parts.headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use domain::models::admin::AdminRole;
    use uuid::Uuid;

    fn auth(role: AdminRole) -> AdminAuth {
        AdminAuth {
            admin: Admin {
                id: Uuid::new_v4(),
                email: "owner@example.com".to_string(),
                password_hash: String::new(),
                name: "Owner".to_string(),
                role,
                is_active: true,
                deleted_at: None,
                last_login_at: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            method: AuthMethod::Token,
        }
    }

    #[test]
    fn test_require_super_admin() {
        assert!(auth(AdminRole::SuperAdmin).require_super_admin().is_ok());
        let err = auth(AdminRole::Admin).require_super_admin().unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
