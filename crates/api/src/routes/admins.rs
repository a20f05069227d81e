//! Admin account management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::admin::{AdminProfile, AdminRole, CreateAdminRequest};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::admin_auth::AdminAuth;
use crate::services::auth::NewAdmin;

/// List admins that have not been deleted.
///
/// GET /api/admin/admins
pub async fn list_admins(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<Vec<AdminProfile>>, ApiError> {
    let admins = state.admin_auth().list_admins().await?;
    Ok(Json(admins.into_iter().map(AdminProfile::from).collect()))
}

/// Create an admin.
///
/// POST /api/admin/admins
///
/// Super admins only. Role defaults to `admin`.
pub async fn create_admin(
    State(state): State<AppState>,
    auth: AdminAuth,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminProfile>), ApiError> {
    request.validate()?;

    let admin = state
        .admin_auth()
        .create_admin(
            &auth.admin,
            NewAdmin {
                email: &request.email,
                password: &request.password,
                name: &request.name,
                role: request.role.unwrap_or(AdminRole::Admin),
            },
        )
        .await?;

    info!(admin_id = %admin.id, "Admin account created");
    Ok((StatusCode::CREATED, Json(admin.into())))
}

/// Soft-delete an admin.
///
/// DELETE /api/admin/admins/:admin_id
pub async fn delete_admin(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(admin_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin_auth().delete_admin(&auth.admin, admin_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
