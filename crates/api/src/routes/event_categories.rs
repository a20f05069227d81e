//! Event category routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::event_category::{
    CreateEventCategoryRequest, EventCategory, UpdateEventCategoryRequest,
};
use persistence::repositories::EventCategoryRepository;
use shared::validation::slugify;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn category_not_found() -> ApiError {
    ApiError::NotFound("Event category not found".into())
}

/// List event categories by name. Served on both the public and admin paths.
///
/// GET /api/event-categories
pub async fn list_event_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventCategory>>, ApiError> {
    let categories = EventCategoryRepository::new(state.pool.clone())
        .list()
        .await?;
    Ok(Json(categories.into_iter().map(EventCategory::from).collect()))
}

/// Create an event category.
///
/// POST /api/admin/event-categories
pub async fn create_event_category(
    State(state): State<AppState>,
    Json(request): Json<CreateEventCategoryRequest>,
) -> Result<(StatusCode, Json<EventCategory>), ApiError> {
    request.validate()?;

    let name = request.name.trim();
    let slug = request
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slugify(name));
    if slug.is_empty() {
        return Err(ApiError::validation(
            "Slug could not be derived from the category name",
        ));
    }

    let category: EventCategory = EventCategoryRepository::new(state.pool.clone())
        .create(name, &slug, request.description.as_deref())
        .await?
        .into();

    info!(category_id = %category.id, slug = %category.slug, "Event category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update an event category.
///
/// PUT /api/admin/event-categories/:category_id
pub async fn update_event_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<UpdateEventCategoryRequest>,
) -> Result<Json<EventCategory>, ApiError> {
    request.validate()?;

    let category: EventCategory = EventCategoryRepository::new(state.pool.clone())
        .update(
            category_id,
            request.name.as_deref().map(str::trim),
            request.slug.as_deref(),
            request.description.as_deref(),
        )
        .await?
        .ok_or_else(category_not_found)?
        .into();

    info!(category_id = %category.id, "Event category updated");
    Ok(Json(category))
}

/// Delete an event category.
///
/// DELETE /api/admin/event-categories/:category_id
///
/// Refused with 409 while events still reference the category.
pub async fn delete_event_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EventCategoryRepository::new(state.pool.clone());

    let in_use = repo.count_events(category_id).await?;
    if in_use > 0 {
        return Err(ApiError::Conflict(format!(
            "Category is used by {} event(s)",
            in_use
        )));
    }

    if repo.delete(category_id).await? == 0 {
        return Err(category_not_found());
    }

    info!(category_id = %category_id, "Event category deleted");
    Ok(StatusCode::NO_CONTENT)
}
