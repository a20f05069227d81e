//! Storefront banner routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::banner::{Banner, CreateBannerRequest, UpdateBannerRequest};
use persistence::repositories::BannerRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn banner_not_found() -> ApiError {
    ApiError::NotFound("Banner not found".into())
}

/// Active banners in display order.
///
/// GET /api/banners
pub async fn list_banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>, ApiError> {
    let banners = BannerRepository::new(state.pool.clone()).list(true).await?;
    Ok(Json(banners.into_iter().map(Banner::from).collect()))
}

/// GET /api/admin/banners
pub async fn admin_list_banners(
    State(state): State<AppState>,
) -> Result<Json<Vec<Banner>>, ApiError> {
    let banners = BannerRepository::new(state.pool.clone()).list(false).await?;
    Ok(Json(banners.into_iter().map(Banner::from).collect()))
}

/// Create a banner.
///
/// POST /api/admin/banners
pub async fn create_banner(
    State(state): State<AppState>,
    Json(request): Json<CreateBannerRequest>,
) -> Result<(StatusCode, Json<Banner>), ApiError> {
    request.validate()?;

    let banner: Banner = BannerRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(banner_id = %banner.id, "Banner created");
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Update a banner.
///
/// PUT /api/admin/banners/:banner_id
pub async fn update_banner(
    State(state): State<AppState>,
    Path(banner_id): Path<Uuid>,
    Json(request): Json<UpdateBannerRequest>,
) -> Result<Json<Banner>, ApiError> {
    request.validate()?;

    let banner: Banner = BannerRepository::new(state.pool.clone())
        .update(banner_id, &request)
        .await?
        .ok_or_else(banner_not_found)?
        .into();

    info!(banner_id = %banner.id, "Banner updated");
    Ok(Json(banner))
}

/// Delete a banner.
///
/// DELETE /api/admin/banners/:banner_id
pub async fn delete_banner(
    State(state): State<AppState>,
    Path(banner_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = BannerRepository::new(state.pool.clone())
        .delete(banner_id)
        .await?;
    if deleted == 0 {
        return Err(banner_not_found());
    }

    info!(banner_id = %banner_id, "Banner deleted");
    Ok(StatusCode::NO_CONTENT)
}
