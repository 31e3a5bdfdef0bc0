//! The aggregation pass.
//!
//! Folds a member's classified, attributed transaction records into the
//! figures the rendering layer shows: per-row paid/pending totals, savings
//! balances with the fully-paid transfer rule, and per-column sheet cells.
//! Everything here recovers locally; a bad record degrades its own
//! contribution and lands in the diagnostics, never aborting the pass.

pub mod diagnostics;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use diagnostics::Diagnostics;
pub use error::ReconcileWarning;
pub use service::AggregationService;
pub use types::{ColumnCell, RenderModel, RowView};
