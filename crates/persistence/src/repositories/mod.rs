//! Repository implementations for database operations.

pub mod admin;
pub mod admin_session;
pub mod banner;
pub mod event;
pub mod event_category;
pub mod order;
pub mod product;
pub mod setting;
pub mod testimony;

pub use admin::AdminRepository;
pub use admin_session::AdminSessionRepository;
pub use banner::BannerRepository;
pub use event::EventRepository;
pub use event_category::EventCategoryRepository;
pub use order::{NewOrder, OrderRepository};
pub use product::{ProductFilter, ProductInput, ProductRepository};
pub use setting::SettingRepository;
pub use testimony::TestimonyRepository;
