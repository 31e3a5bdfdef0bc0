//! Reconciliation warning taxonomy.
//!
//! These are warnings, not errors: every one of them is locally recovered
//! and the pass continues with a degraded or capped value. They exist so
//! tests and operators can catch systematic misattribution, which is
//! indistinguishable from correct-but-unusual data at runtime.

use kisti_shared::types::{RecordId, SaleId, Taka};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recovered anomaly observed during decoding or aggregation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileWarning {
    /// A record carried no usable date for its classification.
    #[error("Record {record_id} has no usable date")]
    InvalidDate {
        /// The offending record.
        record_id: RecordId,
    },

    /// A record carried a missing or negative amount.
    #[error("Record {record_id} has invalid amount {amount}")]
    InvalidAmount {
        /// The offending record.
        record_id: RecordId,
        /// The amount as reported.
        amount: Decimal,
    },

    /// A record fit more than one row under the amount-tolerance rule with
    /// no stronger signal; resolved to the member's first candidate row.
    #[error("Record {record_id} fits {candidate_rows} rows by amount tolerance")]
    AmbiguousAttribution {
        /// The offending record.
        record_id: RecordId,
        /// How many rows the amount fit.
        candidate_rows: usize,
    },

    /// Attributed payments exceeded a row's total; the paid figure was
    /// capped at the total.
    #[error("Sale {sale_id} over-collected by {excess}")]
    OverCollection {
        /// The over-collected sale row.
        sale_id: SaleId,
        /// The amount beyond the row's total.
        excess: Taka,
    },
}
