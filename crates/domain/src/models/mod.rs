//! Domain models for the Gift Store.

pub mod admin;
pub mod banner;
pub mod event;
pub mod event_category;
pub mod order;
pub mod product;
pub mod setting;
pub mod testimony;

pub use admin::{Admin, AdminProfile, AdminRole};
pub use banner::Banner;
pub use event::Event;
pub use event_category::EventCategory;
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use product::Product;
pub use setting::{ContactNumbers, Setting};
pub use testimony::Testimony;
