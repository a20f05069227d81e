//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Phone numbers: optional leading `+`, then 10 to 15 digits.
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{10,15}$").unwrap();
    /// Lower-case slugs: words of `[a-z0-9]` joined by single hyphens.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Strips spaces, hyphens and parentheses that customers commonly type.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Validates a phone number after normalization.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(&normalize_phone(phone)) {
        Ok(())
    } else {
        Err(error(
            "phone_format",
            "Phone number must contain 10 to 15 digits",
        ))
    }
}

/// Validates a URL slug.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(error(
            "slug_format",
            "Slug may only contain lower-case letters, digits and single hyphens",
        ))
    }
}

/// Validates that a single image reference is an absolute http(s) URL.
pub fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    if (url.starts_with("https://") || url.starts_with("http://")) && url.len() > 8 {
        Ok(())
    } else {
        Err(error("image_url", "Image must be an http(s) URL"))
    }
}

/// Validates every entry of an image list.
pub fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    urls.iter().try_for_each(|u| validate_image_url(u))
}

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// Builds a slug from free text: lower-cases, replaces runs of
/// non-alphanumerics with single hyphens and trims hyphens at the ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
