//! Google sign-in for the admin panel (authorization code + PKCE).

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::crypto::{constant_time_eq, generate_token, pkce_challenge};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_login_attempt;
use crate::services::cookies::{append_cookies, OAUTH_STATE_COOKIE, OAUTH_VERIFIER_COOKIE};
use crate::services::google_oauth::GoogleOAuthClient;

const STATE_BYTES: usize = 32;
/// 48 random bytes encode to a 64 character verifier (RFC 7636 allows 43-128).
const VERIFIER_BYTES: usize = 48;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub expires_at: DateTime<Utc>,
}

fn google_client(state: &AppState) -> Result<Arc<GoogleOAuthClient>, ApiError> {
    state
        .google
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("Google sign-in is not configured".into()))
}

/// Start Google sign-in.
///
/// GET /api/auth/google
///
/// Stores state and PKCE verifier in short-lived cookies and redirects to
/// Google's consent screen.
pub async fn start(State(state): State<AppState>) -> Result<(HeaderMap, Redirect), ApiError> {
    let google = google_client(&state)?;

    let oauth_state = generate_token(STATE_BYTES);
    let verifier = generate_token(VERIFIER_BYTES);
    let url = google
        .authorization_url(&oauth_state, &pkce_challenge(&verifier))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    append_cookies(
        &mut headers,
        [
            state.cookies.oauth_state_cookie(&oauth_state),
            state.cookies.oauth_verifier_cookie(&verifier),
        ],
    );

    Ok((headers, Redirect::to(&url)))
}

/// Google redirect target.
///
/// GET /api/auth/google/callback
///
/// The handshake cookies are cleared whether or not sign-in succeeds.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    request_headers: HeaderMap,
) -> Response {
    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, state.cookies.clear_oauth_cookies());

    match complete_sign_in(&state, &query, &request_headers).await {
        Ok(session_token) => {
            record_login_attempt("google", true);
            append_cookies(&mut headers, [state.cookies.session_cookie(&session_token)]);
            (
                headers,
                Redirect::to(&state.config.oauth.post_login_redirect),
            )
                .into_response()
        }
        Err(err) => {
            if matches!(err, ApiError::Unauthorized(_)) {
                record_login_attempt("google", false);
            }
            (headers, err).into_response()
        }
    }
}

async fn complete_sign_in(
    state: &AppState,
    query: &CallbackQuery,
    request_headers: &HeaderMap,
) -> Result<String, ApiError> {
    let google = google_client(state)?;

    if let Some(error) = &query.error {
        tracing::info!(error = %error, "Google sign-in was not completed");
        return Err(ApiError::Unauthorized("Google sign-in failed".into()));
    }

    let expected_state = state
        .cookies
        .extract_cookie(request_headers, OAUTH_STATE_COOKIE);
    let state_matches = match (expected_state, query.state.as_deref()) {
        (Some(expected), Some(received)) => constant_time_eq(expected, received),
        _ => false,
    };
    if !state_matches {
        return Err(ApiError::BadRequest("Invalid OAuth state".into()));
    }

    let verifier = state
        .cookies
        .extract_cookie(request_headers, OAUTH_VERIFIER_COOKIE)
        .ok_or_else(|| ApiError::BadRequest("Missing PKCE verifier".into()))?;
    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing authorization code".into()))?;

    let user = google.authenticate(code, verifier).await.map_err(|e| {
        tracing::warn!(error = %e, "Google sign-in failed");
        ApiError::Unauthorized("Google sign-in failed".into())
    })?;

    if !google.is_email_allowed(&user.email) {
        tracing::warn!("Google sign-in rejected: email not on allow-list");
        return Err(ApiError::Unauthorized("Google sign-in failed".into()));
    }

    let token = state
        .sessions()
        .create(
            &user.email.trim().to_lowercase(),
            user.name.as_deref(),
            user.picture.as_deref(),
        )
        .await?;

    tracing::info!("Admin signed in with Google");
    Ok(token)
}

/// Current Google session user.
///
/// GET /api/auth/google/session
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = state
        .cookies
        .extract_session_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("No active session".into()))?;

    let user = state
        .sessions()
        .resolve(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("No active session".into()))?;

    Ok(Json(SessionResponse {
        email: user.email,
        name: user.name,
        picture: user.picture,
        expires_at: user.expires_at,
    }))
}
