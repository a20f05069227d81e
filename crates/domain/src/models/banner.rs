//! Storefront banner models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_image_url;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBannerRequest {
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    #[validate(length(max = 300, message = "Subtitle must be at most 300 characters"))]
    pub subtitle: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[validate(length(max = 500, message = "Link must be at most 500 characters"))]
    pub link_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 1000, message = "Sort order must be 0-1000"))]
    pub sort_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBannerRequest {
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 300, message = "Subtitle must be at most 300 characters"))]
    pub subtitle: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,

    #[validate(length(max = 500, message = "Link must be at most 500 characters"))]
    pub link_url: Option<String>,

    #[validate(range(min = 0, max = 1000, message = "Sort order must be 0-1000"))]
    pub sort_order: Option<i32>,

    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}
