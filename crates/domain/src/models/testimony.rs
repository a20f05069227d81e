//! Customer testimony models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_image_url;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    pub id: Uuid,
    pub customer_name: String,
    pub message: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonyRequest {
    #[validate(length(min = 2, max = 100, message = "Customer name must be 2-100 characters"))]
    pub customer_name: String,

    #[validate(length(min = 10, max = 2000, message = "Message must be 10-2000 characters"))]
    pub message: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(custom(function = "validate_image_url"))]
    pub avatar_url: Option<String>,

    #[serde(default = "default_true")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonyRequest {
    #[validate(length(min = 2, max = 100, message = "Customer name must be 2-100 characters"))]
    pub customer_name: Option<String>,

    #[validate(length(min = 10, max = 2000, message = "Message must be 10-2000 characters"))]
    pub message: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(custom(function = "validate_image_url"))]
    pub avatar_url: Option<String>,

    pub is_visible: Option<bool>,
}

fn default_true() -> bool {
    true
}
