//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin;
pub mod admin_session;
pub mod banner;
pub mod event;
pub mod event_category;
pub mod order;
pub mod product;
pub mod setting;
pub mod testimony;

pub use admin::AdminEntity;
pub use admin_session::AdminSessionEntity;
pub use banner::BannerEntity;
pub use event::EventEntity;
pub use event_category::EventCategoryEntity;
pub use order::OrderEntity;
pub use product::ProductEntity;
pub use setting::SettingEntity;
pub use testimony::TestimonyEntity;
