//! Admin password login, logout, identity and first-run setup.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use domain::models::admin::{AdminProfile, CreateAdminRequest, LoginRequest, SetupStatus};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::admin_auth::AdminAuth;
use crate::middleware::metrics::record_login_attempt;
use crate::services::auth::AuthError;
use crate::services::cookies::append_cookies;

/// Log in with email and password.
///
/// POST /api/auth/login
///
/// Sets the `admin-token` cookie and returns the admin profile.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AdminProfile>), ApiError> {
    request.validate()?;

    let outcome = match state
        .admin_auth()
        .login(&request.email, &request.password)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            if matches!(e, AuthError::InvalidCredentials) {
                record_login_attempt("password", false);
            }
            return Err(e.into());
        }
    };
    record_login_attempt("password", true);

    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, [state.cookies.admin_token_cookie(&outcome.token)]);

    Ok((headers, Json(outcome.admin.into())))
}

/// Log out.
///
/// POST /api/auth/logout
///
/// Clears the admin token cookie and revokes the Google session, if any.
/// Always succeeds so a stale cookie can still be cleared.
pub async fn logout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, [state.cookies.clear_admin_token_cookie()]);

    if let Some(session_token) = state.cookies.extract_session_token(&request_headers) {
        state.sessions().revoke(session_token).await?;
        append_cookies(&mut headers, [state.cookies.clear_session_cookie()]);
    }

    Ok((StatusCode::NO_CONTENT, headers))
}

/// Current admin.
///
/// GET /api/auth/me
pub async fn me(auth: AdminAuth) -> Json<AdminProfile> {
    Json(auth.admin.into())
}

/// Whether first-run setup is still open.
///
/// GET /api/auth/setup
pub async fn setup_status(State(state): State<AppState>) -> Result<Json<SetupStatus>, ApiError> {
    let needs_setup = state.admin_auth().needs_setup().await?;
    Ok(Json(SetupStatus { needs_setup }))
}

/// Create the first super admin.
///
/// POST /api/auth/setup
///
/// Only allowed while no active admin exists; otherwise 403.
pub async fn setup(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminProfile>), ApiError> {
    request.validate()?;

    let admin = state
        .admin_auth()
        .setup(&request.email, &request.password, &request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into())))
}
