//! Strict domain types for backend transaction records.

use chrono::NaiveDate;
use kisti_shared::types::{DistributionId, RecordId, Taka};
use serde::{Deserialize, Serialize};

/// Coarse installment tag on a record.
///
/// `Regular` marks scheduled loan installments, `Extra` marks savings and
/// ad-hoc collections. The tag alone is unreliable; classification combines
/// it with the free-text note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentKind {
    /// Scheduled loan installment.
    Regular,
    /// Savings or ad-hoc collection.
    Extra,
}

/// Collection status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Fully collected.
    Collected,
    /// Partially collected.
    Partial,
    /// Scheduled but not yet collected.
    Pending,
}

impl RecordStatus {
    /// Returns true if money actually changed hands.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Collected | Self::Partial)
    }
}

/// One transaction record as the backend reports it.
///
/// Dates are already Dhaka calendar days (normalized at the boundary);
/// `None` means the backend omitted the field or sent something unreadable.
/// `paid_amount` absent means unset, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Backend-issued record identifier.
    pub id: RecordId,
    /// Total amount of the record.
    pub amount: Taka,
    /// Actually-collected portion for partial payments, when tracked.
    pub paid_amount: Option<Taka>,
    /// Coarse installment tag.
    pub kind: InstallmentKind,
    /// Collection status.
    pub status: RecordStatus,
    /// Free-text annotation; the primary classification signal.
    pub note: String,
    /// Link to a product-sale disbursement; authoritative when present.
    pub distribution_id: Option<DistributionId>,
    /// Day the money was collected.
    pub collection_date: Option<NaiveDate>,
    /// Day the installment was scheduled for.
    pub due_date: Option<NaiveDate>,
    /// Day the record was created.
    pub created_date: Option<NaiveDate>,
    /// True when the amount was deducted automatically from savings.
    pub auto_deducted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_settled() {
        assert!(RecordStatus::Collected.is_settled());
        assert!(RecordStatus::Partial.is_settled());
        assert!(!RecordStatus::Pending.is_settled());
    }
}
