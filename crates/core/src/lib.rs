//! Core reconciliation logic for Kisti.
//!
//! This crate contains pure business logic with ZERO web or I/O dependencies.
//! It turns a member's raw transaction history into the figures shown on the
//! collection sheet and the member profile ledger.
//!
//! # Modules
//!
//! - `calendar` - Dhaka-normalized calendar dates and collection schedules
//! - `record` - Transaction record domain types
//! - `classify` - Note-driven transaction classification
//! - `sale` - Product-sale rows and members
//! - `attribution` - Record-to-row matching and the double-counting guard
//! - `aggregate` - The aggregation pass producing render models

pub mod aggregate;
pub mod attribution;
pub mod calendar;
pub mod classify;
pub mod record;
pub mod sale;
