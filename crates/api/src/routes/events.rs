//! Event listing routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::event::{CreateEventRequest, Event, EventQuery, UpdateEventRequest};
use persistence::repositories::{EventCategoryRepository, EventRepository};
use shared::pagination::{PageParams, Paginated};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found".into())
}

async fn ensure_category_exists(state: &AppState, category_id: Uuid) -> Result<(), ApiError> {
    EventCategoryRepository::new(state.pool.clone())
        .find_by_id(category_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::BadRequest("Event category does not exist".into()))
}

async fn list_page(
    state: &AppState,
    query: EventQuery,
    published_only: bool,
) -> Result<Paginated<Event>, ApiError> {
    let page = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let repo = EventRepository::new(state.pool.clone());
    let total = repo.count(published_only, query.category_id).await?;
    let events = repo
        .list(
            published_only,
            query.category_id,
            i64::from(page.limit()),
            page.offset(),
        )
        .await?;
    Ok(Paginated::new(
        events.into_iter().map(Event::from).collect(),
        &page,
        total,
    ))
}

async fn find_event(
    state: &AppState,
    event_id: Uuid,
    published_only: bool,
) -> Result<Event, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .find_by_id(event_id, published_only)
        .await?
        .ok_or_else(event_not_found)?;
    Ok(event.into())
}

/// Published events, optionally by category.
///
/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Paginated<Event>>, ApiError> {
    Ok(Json(list_page(&state, query, true).await?))
}

/// GET /api/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(find_event(&state, event_id, true).await?))
}

/// GET /api/admin/events
pub async fn admin_list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Paginated<Event>>, ApiError> {
    Ok(Json(list_page(&state, query, false).await?))
}

/// GET /api/admin/events/:event_id
pub async fn admin_get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(find_event(&state, event_id, false).await?))
}

/// Create an event.
///
/// POST /api/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    request.validate()?;
    ensure_category_exists(&state, request.category_id).await?;

    let event: Event = EventRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(event_id = %event.id, category_id = %event.category_id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event.
///
/// PUT /api/admin/events/:event_id
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    request.validate()?;
    if let Some(category_id) = request.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let event: Event = EventRepository::new(state.pool.clone())
        .update(event_id, &request)
        .await?
        .ok_or_else(event_not_found)?
        .into();

    info!(event_id = %event.id, "Event updated");
    Ok(Json(event))
}

/// Delete an event.
///
/// DELETE /api/admin/events/:event_id
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = EventRepository::new(state.pool.clone())
        .delete(event_id)
        .await?;
    if deleted == 0 {
        return Err(event_not_found());
    }

    info!(event_id = %event_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
