//! Shared types, errors, and configuration for Kisti.
//!
//! This crate provides common types used across all other crates:
//! - The `Taka` money type with decimal precision
//! - Typed IDs for the backend's opaque entity identifiers
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
