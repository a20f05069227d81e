//! Shared utilities and common types for the Gift Store backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Admin token signing and verification (HS256 JWT)
//! - Password hashing with Argon2id
//! - Session token, hashing and PKCE helpers
//! - Common validation logic
//! - Offset pagination

pub mod crypto;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
