//! Startup bootstrap of the first super admin.
//!
//! When bootstrap credentials are configured and no active admin exists,
//! a super admin is created before the server starts taking traffic. The
//! insert goes through the same conditional path as the setup route, so a
//! bootstrap racing a setup request still yields a single super admin.

use tracing::{info, warn};
use validator::ValidateEmail;

use crate::config::AdminBootstrapConfig;
use crate::services::auth::{AdminAuthService, AuthError};

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create bootstrap admin: {0}")]
    Auth(#[from] AuthError),
}

/// What the bootstrap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No bootstrap credentials configured.
    NotConfigured,
    /// An active admin already exists.
    AlreadyInitialized,
    /// A super admin was created with this email.
    Created(String),
}

/// Create the configured super admin if no active admin exists yet.
///
/// Safe to call on every boot.
pub async fn bootstrap_admin(
    auth: &AdminAuthService,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    let email = config.bootstrap_email.trim();
    if email.is_empty() {
        return Ok(BootstrapOutcome::NotConfigured);
    }
    if config.bootstrap_password.is_empty() {
        warn!("GS__ADMIN__BOOTSTRAP_EMAIL is set but GS__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping bootstrap");
        return Ok(BootstrapOutcome::NotConfigured);
    }
    if !email.validate_email() {
        return Err(BootstrapError::Config(format!(
            "bootstrap email '{}' is not a valid address",
            email
        )));
    }

    let name = match config.bootstrap_name.trim() {
        "" => "Store Owner",
        name => name,
    };

    match auth.setup(email, &config.bootstrap_password, name).await {
        Ok(admin) => {
            info!(admin_id = %admin.id, email = %admin.email, "Bootstrap super admin created");
            warn!(
                "SECURITY: Remove GS__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
            );
            Ok(BootstrapOutcome::Created(admin.email))
        }
        Err(AuthError::SetupClosed) => {
            info!("Active admin already exists - skipping bootstrap");
            Ok(BootstrapOutcome::AlreadyInitialized)
        }
        Err(AuthError::WeakPassword(reason)) => Err(BootstrapError::Config(format!(
            "bootstrap password rejected: {}",
            reason
        ))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::repositories::AdminRepository;
    use shared::jwt::JwtConfig;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    /// Never connects; only usable by paths that return before touching the store.
    fn offline_service() -> AdminAuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .unwrap();
        AdminAuthService::new(
            AdminRepository::new(pool),
            Arc::new(JwtConfig::new(
                "test-secret-key-for-bootstrap-tests-32b",
                3600,
                0,
            )),
        )
    }

    fn config(email: &str, password: &str) -> AdminBootstrapConfig {
        AdminBootstrapConfig {
            bootstrap_email: email.to_string(),
            bootstrap_password: password.to_string(),
            bootstrap_name: "Owner".to_string(),
        }
    }

    #[tokio::test]
    async fn test_skips_when_unconfigured() {
        let outcome = bootstrap_admin(&offline_service(), &config("", ""))
            .await
            .unwrap();
        assert_eq!(outcome, BootstrapOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_skips_without_password() {
        let outcome = bootstrap_admin(&offline_service(), &config("owner@example.com", ""))
            .await
            .unwrap();
        assert_eq!(outcome, BootstrapOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_rejects_invalid_email() {
        let err = bootstrap_admin(&offline_service(), &config("not-an-email", "Password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }

    #[tokio::test]
    async fn test_rejects_weak_password() {
        let err = bootstrap_admin(&offline_service(), &config("owner@example.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }
}
