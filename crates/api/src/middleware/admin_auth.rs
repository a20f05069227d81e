//! Admin authentication middleware.
//!
//! Guards every `/api/admin/*` route. The signed admin token (cookie, then
//! bearer header) is checked first; a Google sign-in session belonging to an
//! active admin is accepted when no usable token is present.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::admin_auth::{AdminAuth, AuthMethod};
use crate::services::auth::AuthError;

/// Middleware that rejects requests without an authenticated admin and
/// stores [`AdminAuth`] in request extensions for handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Resolves the admin behind a request. Failures are a generic 401 so
/// callers cannot tell which check failed; store errors stay 500.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AdminAuth, ApiError> {
    if let Some(token) = state.cookies.extract_admin_token(headers) {
        match state.admin_auth().authenticate_token(token).await {
            Ok(admin) => {
                return Ok(AdminAuth {
                    admin,
                    method: AuthMethod::Token,
                })
            }
            Err(AuthError::Database(e)) => return Err(e.into()),
            Err(e) => tracing::debug!(error = %e, "Admin token rejected"),
        }
    }

    if let Some(session_token) = state.cookies.extract_session_token(headers) {
        if let Some(user) = state.sessions().resolve(session_token).await? {
            match state.admin_auth().find_active_by_email(&user.email).await {
                Ok(Some(admin)) => {
                    return Ok(AdminAuth {
                        admin,
                        method: AuthMethod::GoogleSession,
                    })
                }
                Ok(None) => tracing::debug!("Google session email is not an active admin"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Err(unauthorized())
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Authentication required".into())
}
