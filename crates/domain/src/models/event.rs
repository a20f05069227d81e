//! Event listing models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_image_urls;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    pub category_id: Uuid,

    #[validate(length(
        min = 3,
        max = 6,
        message = "An event needs 3-6 images"
    ))]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,

    pub event_date: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// Absent fields are unchanged; a new image list must still hold 3-6 URLs.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(
        min = 3,
        max = 6,
        message = "An event needs 3-6 images"
    ))]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,

    pub event_date: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub is_published: Option<bool>,
}

/// Query parameters for event listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub category_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn default_true() -> bool {
    true
}
