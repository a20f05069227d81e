//! Application services and external integrations.

pub mod admin_bootstrap;
pub mod admin_session;
pub mod auth;
pub mod cookies;
pub mod google_oauth;
pub mod settings_cache;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use admin_session::SessionService;
pub use auth::AdminAuthService;
pub use settings_cache::SettingsCache;
