//! Typed client for the field-office backend REST API.
//!
//! The backend's wire shapes are loose: optional fields everywhere, dual
//! historical names, dates as strings in several formats. This crate decodes
//! them into the strict `kisti-core` domain types at the boundary, so the
//! reconciliation logic never null-checks anything.

pub mod decode;
pub mod error;
pub mod fetch;
pub mod models;

pub use error::ClientError;
pub use fetch::{ApiClient, MemberBundle};
