//! Pass diagnostics.
//!
//! The telemetry hook for the rendering layer and the test suite: counters
//! per anomaly class plus the recovered warnings themselves. Not shown to
//! end users.

use serde::Serialize;

use super::error::ReconcileWarning;

/// Counters and recovered warnings for one aggregation pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Duplicate claims rejected by the double-counting guard.
    pub guard_skips: u32,
    /// Records dropped for carrying no usable date.
    pub unparseable_records: u32,
    /// Records dropped for missing or negative amounts.
    pub invalid_amounts: u32,
    /// Rows whose paid figure was capped at the total.
    pub over_collections: u32,
    /// Records attributed by tolerance despite fitting several rows.
    pub ambiguous_attributions: u32,
    warnings: Vec<ReconcileWarning>,
}

impl Diagnostics {
    /// Records a warning, advancing its class counter.
    pub(crate) fn record(&mut self, warning: ReconcileWarning) {
        match warning {
            ReconcileWarning::InvalidDate { .. } => self.unparseable_records += 1,
            ReconcileWarning::InvalidAmount { .. } => self.invalid_amounts += 1,
            ReconcileWarning::AmbiguousAttribution { .. } => self.ambiguous_attributions += 1,
            ReconcileWarning::OverCollection { .. } => self.over_collections += 1,
        }
        self.warnings.push(warning);
    }

    /// Folds in warnings recovered elsewhere (the decode boundary).
    pub fn absorb(&mut self, warnings: impl IntoIterator<Item = ReconcileWarning>) {
        for warning in warnings {
            self.record(warning);
        }
    }

    /// The recovered warnings, in occurrence order.
    #[must_use]
    pub fn warnings(&self) -> &[ReconcileWarning] {
        &self.warnings
    }

    /// Returns true when the pass saw no anomalies at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.guard_skips == 0 && self.warnings.is_empty()
    }
}
