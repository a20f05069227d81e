//! HTTP API for the Gift Store: storefront routes, admin routes and the
//! services behind them.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod services;
