//! Key/value store settings and the contact number fallbacks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Category holding storefront contact numbers.
pub const CONTACT_CATEGORY: &str = "contact";

pub const WHATSAPP_NUMBER_KEY: &str = "whatsapp_number";
pub const PHONE_NUMBER_KEY: &str = "phone_number";
pub const CORPORATE_WHATSAPP_NUMBER_KEY: &str = "corporate_whatsapp_number";

/// Served when no stored value exists or the database is unreachable.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919876543210";
pub const DEFAULT_PHONE_NUMBER: &str = "+919876543210";
pub const DEFAULT_CORPORATE_WHATSAPP_NUMBER: &str = "919876543211";

/// A stored setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub category: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or replacing a setting by key.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSettingRequest {
    #[validate(length(min = 1, max = 1000, message = "Value must be 1-1000 characters"))]
    pub value: String,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Query parameters for listing settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingQuery {
    pub category: Option<String>,
}

/// Contact numbers shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactNumbers {
    pub whatsapp_number: String,
    pub phone_number: String,
    pub corporate_whatsapp_number: String,
}

impl ContactNumbers {
    /// Builds contact numbers from a category map, using the fallback
    /// constant for every key that is missing or blank.
    pub fn from_values(values: &BTreeMap<String, String>) -> Self {
        let pick = |key: &str, fallback: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            whatsapp_number: pick(WHATSAPP_NUMBER_KEY, DEFAULT_WHATSAPP_NUMBER),
            phone_number: pick(PHONE_NUMBER_KEY, DEFAULT_PHONE_NUMBER),
            corporate_whatsapp_number: pick(
                CORPORATE_WHATSAPP_NUMBER_KEY,
                DEFAULT_CORPORATE_WHATSAPP_NUMBER,
            ),
        }
    }
}

impl Default for ContactNumbers {
    fn default() -> Self {
        Self::from_values(&BTreeMap::new())
    }
}

/// Hard-coded values for a category, used when the database cannot be read.
pub fn fallback_settings(category: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    if category == CONTACT_CATEGORY {
        values.insert(
            WHATSAPP_NUMBER_KEY.to_string(),
            DEFAULT_WHATSAPP_NUMBER.to_string(),
        );
        values.insert(
            PHONE_NUMBER_KEY.to_string(),
            DEFAULT_PHONE_NUMBER.to_string(),
        );
        values.insert(
            CORPORATE_WHATSAPP_NUMBER_KEY.to_string(),
            DEFAULT_CORPORATE_WHATSAPP_NUMBER.to_string(),
        );
    }
    values
}

/// Normalizes a setting key or category: trimmed and lower-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
