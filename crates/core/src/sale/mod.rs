//! Product-sale rows and members.
//!
//! A sale is one checkout event that may bundle several products; the
//! backend reports the bundle's entries with a shared sale transaction id.
//! Rows are rebuilt transiently for every aggregation pass, never persisted
//! here.

pub mod types;

pub use types::{InstallmentFrequency, Member, ProductEntry, RowStatus, SaleRow};
