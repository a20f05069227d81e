//! Domain services for the Gift Store.
//!
//! Services contain business logic that operates on domain models.

pub mod checkout;

pub use checkout::{price_order, CheckoutError, PricedOrder};
