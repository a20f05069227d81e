//! Customer testimony routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::testimony::{CreateTestimonyRequest, Testimony, UpdateTestimonyRequest};
use persistence::repositories::TestimonyRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn testimony_not_found() -> ApiError {
    ApiError::NotFound("Testimony not found".into())
}

/// Visible testimonies, newest first.
///
/// GET /api/testimonies
pub async fn list_testimonies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimony>>, ApiError> {
    let testimonies = TestimonyRepository::new(state.pool.clone())
        .list(true)
        .await?;
    Ok(Json(testimonies.into_iter().map(Testimony::from).collect()))
}

/// GET /api/admin/testimonies
pub async fn admin_list_testimonies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimony>>, ApiError> {
    let testimonies = TestimonyRepository::new(state.pool.clone())
        .list(false)
        .await?;
    Ok(Json(testimonies.into_iter().map(Testimony::from).collect()))
}

/// Create a testimony.
///
/// POST /api/admin/testimonies
pub async fn create_testimony(
    State(state): State<AppState>,
    Json(request): Json<CreateTestimonyRequest>,
) -> Result<(StatusCode, Json<Testimony>), ApiError> {
    request.validate()?;

    let testimony: Testimony = TestimonyRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(testimony_id = %testimony.id, rating = testimony.rating, "Testimony created");
    Ok((StatusCode::CREATED, Json(testimony)))
}

/// Update a testimony.
///
/// PUT /api/admin/testimonies/:testimony_id
pub async fn update_testimony(
    State(state): State<AppState>,
    Path(testimony_id): Path<Uuid>,
    Json(request): Json<UpdateTestimonyRequest>,
) -> Result<Json<Testimony>, ApiError> {
    request.validate()?;

    let testimony: Testimony = TestimonyRepository::new(state.pool.clone())
        .update(testimony_id, &request)
        .await?
        .ok_or_else(testimony_not_found)?
        .into();

    info!(testimony_id = %testimony.id, "Testimony updated");
    Ok(Json(testimony))
}

/// Delete a testimony.
///
/// DELETE /api/admin/testimonies/:testimony_id
pub async fn delete_testimony(
    State(state): State<AppState>,
    Path(testimony_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = TestimonyRepository::new(state.pool.clone())
        .delete(testimony_id)
        .await?;
    if deleted == 0 {
        return Err(testimony_not_found());
    }

    info!(testimony_id = %testimony_id, "Testimony deleted");
    Ok(StatusCode::NO_CONTENT)
}
