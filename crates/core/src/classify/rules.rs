//! The ordered classification rules and effective date/amount selection.

use chrono::NaiveDate;
use kisti_shared::types::Taka;

use crate::record::{InstallmentKind, RecordStatus, TransactionRecord};

use super::types::{ClassifyRules, RecordKind};

/// Classifies one record. Pure: depends only on the record and the rules.
///
/// Rules are evaluated in order and the first match wins. Order matters
/// because some notes satisfy several naive patterns; in particular a
/// savings sub-component written into a sale-creation note contains both the
/// savings marker and the sale marker and must not be read as a standalone
/// deposit.
#[must_use]
pub fn classify(record: &TransactionRecord, rules: &ClassifyRules) -> RecordKind {
    let note = record.note.to_lowercase();
    let has = |marker: &str| note.contains(marker.to_lowercase().as_str());
    let has_any = |markers: &[String]| markers.iter().any(|m| has(m));

    let is_extra = record.kind == InstallmentKind::Extra;

    // 1. The record documenting the sale itself.
    if has(&rules.sale_marker)
        && (has(&rules.sale_id_marker) || (is_extra && !has(&rules.savings_collection_marker)))
    {
        return RecordKind::SaleCreation;
    }

    // 2. A savings line embedded inside a sale-creation note.
    if is_extra && has(&rules.savings_collection_marker) && has(&rules.sale_marker) {
        return RecordKind::Ignorable;
    }

    // 3. Registration-time opening balance.
    if has(&rules.initial_savings_marker) {
        return RecordKind::SavingsDeposit;
    }

    // 4. Savings withdrawal.
    if is_extra && has(&rules.withdrawal_marker) {
        return RecordKind::SavingsWithdrawal;
    }

    // 5. Standalone savings deposit.
    if is_extra
        && (has(&rules.savings_collection_marker) || has_any(&rules.savings_keywords))
        && !has_any(&rules.savings_exclusions)
    {
        return RecordKind::SavingsDeposit;
    }

    // 6. Loan installment payment.
    if record.kind == InstallmentKind::Regular
        && record.status.is_settled()
        && has_any(&rules.loan_payment_phrases)
    {
        return RecordKind::InstallmentPayment;
    }

    RecordKind::Ignorable
}

/// Selects the calendar day a record is matched on.
///
/// Pending installments sit on their scheduled day; settled ones on the day
/// the money was actually collected, falling back to the record's creation
/// day. Auto-deducted amounts always use the collection day.
#[must_use]
pub fn effective_date(record: &TransactionRecord, kind: RecordKind) -> Option<NaiveDate> {
    match kind {
        RecordKind::InstallmentPayment => {
            if record.auto_deducted {
                record.collection_date
            } else if record.status == RecordStatus::Pending {
                record.due_date
            } else {
                record.collection_date.or(record.created_date)
            }
        }
        RecordKind::SavingsDeposit | RecordKind::SavingsWithdrawal => {
            if record.auto_deducted {
                record.collection_date
            } else {
                record.collection_date.or(record.created_date)
            }
        }
        RecordKind::SaleCreation | RecordKind::Ignorable => None,
    }
}

/// Selects the amount a record contributes when matched.
///
/// A positive `paid_amount` captures the actually-collected portion of a
/// partial or auto-deducted payment and takes precedence over the face
/// amount.
#[must_use]
pub fn effective_amount(record: &TransactionRecord) -> Taka {
    match record.paid_amount {
        Some(paid) if paid.is_positive() => paid,
        _ => record.amount,
    }
}
