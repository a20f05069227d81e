//! Product (gift) catalog models.
//!
//! Prices are integers in minor currency units (paise).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_image_urls, validate_not_blank, validate_slug};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Upper bound for MRP and offer price, in minor units.
pub const MAX_PRICE: i64 = 100_000_000_000;

/// A product in the gift catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub mrp: i64,
    pub offer_percentage: i32,
    pub offer_price: i64,
    pub images: Vec<String>,
    pub is_customizable: bool,
    pub customization_note: Option<String>,
    pub is_visible: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_pricing", skip_on_field_errors = true))]
pub struct CreateProductRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be 2-200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    /// Derived from the name when omitted.
    #[validate(length(max = 200, message = "Slug must be at most 200 characters"))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,

    #[validate(range(min = 0, max = MAX_PRICE, message = "MRP must be 0-100000000000"))]
    pub mrp: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Offer percentage must be 0-100"))]
    pub offer_percentage: i32,

    /// Explicit offer price; computed from the percentage when omitted.
    #[validate(range(min = 0, max = MAX_PRICE, message = "Offer price must be 0-100000000000"))]
    pub offer_price: Option<i64>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,

    #[serde(default)]
    pub is_customizable: bool,

    #[validate(length(max = 500, message = "Customization note must be at most 500 characters"))]
    pub customization_note: Option<String>,

    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default)]
    pub is_featured: bool,
}

/// Request payload for updating a product. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be 2-200 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    #[validate(range(min = 0, max = MAX_PRICE, message = "MRP must be 0-100000000000"))]
    pub mrp: Option<i64>,

    #[validate(range(min = 0, max = 100, message = "Offer percentage must be 0-100"))]
    pub offer_percentage: Option<i32>,

    #[validate(range(min = 0, max = MAX_PRICE, message = "Offer price must be 0-100000000000"))]
    pub offer_price: Option<i64>,

    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,

    pub is_customizable: Option<bool>,

    pub customization_note: Option<String>,

    pub is_visible: Option<bool>,

    pub is_featured: Option<bool>,
}

/// Query parameters for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Request payload for toggling visibility on many products at once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkVisibilityRequest {
    #[validate(length(min = 1, max = 200, message = "Provide 1-200 product ids"))]
    pub ids: Vec<Uuid>,
    pub is_visible: bool,
}

/// Outcome of a best-effort bulk update.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResult {
    pub updated: Vec<Uuid>,
    pub failed: Vec<Uuid>,
}

fn default_true() -> bool {
    true
}

/// Computes the offer price from an MRP and a discount percentage,
/// rounding half up to the nearest minor unit.
pub fn compute_offer_price(mrp: i64, offer_percentage: i32) -> i64 {
    let pct = i128::from(offer_percentage.clamp(0, 100));
    let price = (i128::from(mrp) * (100 - pct) + 50) / 100;
    // Never above `mrp` for a non-negative percentage, so it fits back in i64.
    i64::try_from(price).unwrap_or(mrp)
}

/// Resolves the offer price to store: the explicit price when given,
/// otherwise the percentage-derived one.
pub fn resolve_offer_price(mrp: i64, offer_percentage: i32, offer_price: Option<i64>) -> i64 {
    offer_price.unwrap_or_else(|| compute_offer_price(mrp, offer_percentage))
}

/// Rejects an offer price above the MRP.
pub fn check_offer_price(mrp: i64, offer_price: i64) -> Result<(), ValidationError> {
    if offer_price > mrp {
        let mut err = ValidationError::new("offer_price_above_mrp");
        err.message = Some("Offer price cannot exceed MRP".into());
        return Err(err);
    }
    Ok(())
}

fn validate_create_pricing(request: &CreateProductRequest) -> Result<(), ValidationError> {
    let price = resolve_offer_price(request.mrp, request.offer_percentage, request.offer_price);
    check_offer_price(request.mrp, price)
}
