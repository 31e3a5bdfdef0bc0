//! Attribution policy parameters.
//!
//! The collection sheet and the member profile ledger attribute the same
//! records with different date strictness, and the amount-tolerance
//! constants are heuristics. Both therefore live in an injected policy
//! value rather than in the matcher code.

use chrono::NaiveDate;
use kisti_shared::config::ReconcileConfig;
use kisti_shared::types::Taka;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// How strictly a record's effective date must sit on a column date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateGate {
    /// Within the given number of calendar days (collection sheet).
    Window(i64),
    /// Exact calendar-day equality (member profile ledger).
    Exact,
}

/// Tunable attribution policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Date strictness for column placement.
    pub date_gate: DateGate,
    /// Fraction of the expected installment accepted as deviation.
    pub tolerance_ratio: Decimal,
    /// Minimum absolute deviation accepted.
    pub tolerance_floor: Taka,
}

impl MatchPolicy {
    /// The collection-sheet policy: a three-day window and the production
    /// tolerance constants.
    #[must_use]
    pub fn sheet() -> Self {
        Self {
            date_gate: DateGate::Window(3),
            tolerance_ratio: Decimal::new(5, 1),
            tolerance_floor: Taka::from_whole(200),
        }
    }

    /// The member-profile-ledger policy: exact dates, same tolerances.
    #[must_use]
    pub fn ledger() -> Self {
        Self {
            date_gate: DateGate::Exact,
            ..Self::sheet()
        }
    }

    /// Applies the date gate to a record's effective date and a column date.
    #[must_use]
    pub fn date_gate_passes(&self, effective: NaiveDate, column: NaiveDate) -> bool {
        match self.date_gate {
            DateGate::Window(days) => calendar::is_within_day_range(effective, column, days),
            DateGate::Exact => effective == column,
        }
    }

    /// Returns true if `actual` is close enough to `expected`.
    ///
    /// The accepted deviation is `max(ratio * expected, floor)`.
    #[must_use]
    pub fn within_tolerance(&self, actual: Taka, expected: Taka) -> bool {
        let allowed = Taka::new(self.tolerance_ratio * expected.amount()).max(self.tolerance_floor);
        (actual - expected).abs() <= allowed
    }
}

impl From<&ReconcileConfig> for MatchPolicy {
    /// Builds the sheet policy from configuration.
    fn from(config: &ReconcileConfig) -> Self {
        Self {
            date_gate: DateGate::Window(config.sheet_window_days),
            tolerance_ratio: config.tolerance_ratio,
            tolerance_floor: Taka::new(config.tolerance_floor),
        }
    }
}
