//! Store settings routes.
//!
//! Every write invalidates the cached category it touched, including the
//! previous category when a key moves.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::setting::{
    normalize_key, ContactNumbers, Setting, SettingQuery, UpsertSettingRequest,
};
use persistence::repositories::SettingRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

const MAX_KEY_LEN: usize = 100;

fn parse_key(raw: &str) -> Result<String, ApiError> {
    let key = normalize_key(raw);
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(ApiError::validation("Setting key must be 1-100 characters"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(ApiError::validation(
            "Setting key may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(key)
}

/// Storefront contact numbers, with defaults for anything not stored.
///
/// GET /api/settings/contact
pub async fn contact_numbers(State(state): State<AppState>) -> Json<ContactNumbers> {
    Json(state.settings_cache.contact_numbers().await)
}

/// List settings, optionally by category.
///
/// GET /api/admin/settings
pub async fn list_settings(
    State(state): State<AppState>,
    Query(query): Query<SettingQuery>,
) -> Result<Json<Vec<Setting>>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(normalize_key)
        .filter(|c| !c.is_empty());

    let settings = SettingRepository::new(state.pool.clone())
        .list(category.as_deref())
        .await?;
    Ok(Json(settings.into_iter().map(Setting::from).collect()))
}

/// Create or replace a setting.
///
/// PUT /api/admin/settings/:key
pub async fn upsert_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<Json<Setting>, ApiError> {
    request.validate()?;
    let key = parse_key(&key)?;
    let category = normalize_key(&request.category);
    if category.is_empty() {
        return Err(ApiError::validation("Category must not be blank"));
    }

    let repo = SettingRepository::new(state.pool.clone());
    let previous_category = repo.find_by_key(&key).await?.map(|s| s.category);

    let setting: Setting = repo
        .upsert(
            &key,
            request.value.trim(),
            &category,
            request.description.as_deref(),
        )
        .await?
        .into();

    state.settings_cache.invalidate(&setting.category).await;
    if let Some(previous) = previous_category.filter(|p| *p != setting.category) {
        state.settings_cache.invalidate(&previous).await;
    }

    info!(key = %setting.key, category = %setting.category, "Setting saved");
    Ok(Json(setting))
}

/// Delete a setting.
///
/// DELETE /api/admin/settings/:key
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let key = parse_key(&key)?;

    let removed = SettingRepository::new(state.pool.clone())
        .delete(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting not found".into()))?;

    state.settings_cache.invalidate(&removed.category).await;

    info!(key = %key, category = %removed.category, "Setting deleted");
    Ok(StatusCode::NO_CONTENT)
}
