//! HTTP route handlers.

pub mod admins;
pub mod auth;
pub mod banners;
pub mod event_categories;
pub mod events;
pub mod google_auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod settings;
pub mod testimonies;
