//! Domain layer for the Gift Store backend.
//!
//! This crate contains:
//! - Domain models (Admin, Product, Order, Setting and catalog content)
//! - Request payloads with their validation rules
//! - Business logic services (checkout pricing, order status rules)

pub mod models;
pub mod services;
