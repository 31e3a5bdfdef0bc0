//! The layered attribution matcher.
//!
//! Precedence, strongest first: distribution-id equality, id containment
//! (legacy-data compatibility), product-name mention in the note, amount
//! tolerance (loan payments only), and finally the first-row fallback for
//! identity-less savings which the aggregation pass applies itself.

use kisti_shared::types::Taka;
use serde::{Deserialize, Serialize};

use crate::classify::RecordKind;
use crate::record::TransactionRecord;
use crate::sale::SaleRow;

use super::policy::MatchPolicy;

/// Which attribution layer accepted a record.
///
/// Carried through to diagnostics so tests can assert not just that a
/// record matched, but on which evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Exact distribution-id equality.
    DistributionId,
    /// One identifier contained in the other, or a `DIST-{sale}-{n}`
    /// extraction naming the row's sale.
    IdContainment,
    /// The row's product name (or a long keyword of it) appears in the note.
    ProductName,
    /// The amount sits within tolerance of an expected installment.
    AmountTolerance,
    /// Identity-less savings attributed to the member's first active row.
    FirstRowFallback,
}

/// Runs the identity layers (distribution id, containment, product name)
/// of a record against one row.
#[must_use]
pub fn identity_match(record: &TransactionRecord, row: &SaleRow) -> Option<MatchOutcome> {
    if let Some(record_dist) = &record.distribution_id {
        if row.has_distribution_id(record_dist) {
            return Some(MatchOutcome::DistributionId);
        }

        let rid = record_dist.as_str();
        let sale = row.sale_id.as_str();
        if rid.contains(sale) || sale.contains(rid) {
            return Some(MatchOutcome::IdContainment);
        }
        if extract_sale_id(rid) == Some(sale) {
            return Some(MatchOutcome::IdContainment);
        }
        for row_dist in row.distribution_ids() {
            let other = row_dist.as_str();
            if rid.contains(other) || other.contains(rid) {
                return Some(MatchOutcome::IdContainment);
            }
        }
    }

    if note_mentions_product(&record.note, row) {
        return Some(MatchOutcome::ProductName);
    }

    None
}

/// Runs the amount-tolerance layer for a loan payment against one row.
///
/// When the amount misses this row's expected installment, every sibling
/// row's expected installment is tried before rejecting; legacy sales with
/// no distribution ids sometimes carry another row's installment size on
/// the only row still collecting.
#[must_use]
pub fn tolerance_match(
    effective_amount: Taka,
    row: &SaleRow,
    siblings: &[SaleRow],
    policy: &MatchPolicy,
) -> bool {
    if policy.within_tolerance(effective_amount, row.expected_installment()) {
        return true;
    }

    siblings
        .iter()
        .filter(|s| s.sale_id != row.sale_id)
        .any(|s| policy.within_tolerance(effective_amount, s.expected_installment()))
}

/// Full layered match of one record against one row.
///
/// Only attributable kinds can match; the tolerance layer additionally
/// requires a loan payment. The first-row savings fallback is a cross-row
/// decision and stays with the aggregation pass.
#[must_use]
pub fn match_record(
    record: &TransactionRecord,
    kind: RecordKind,
    effective_amount: Taka,
    row: &SaleRow,
    siblings: &[SaleRow],
    policy: &MatchPolicy,
) -> Option<MatchOutcome> {
    if !kind.is_attributable() {
        return None;
    }

    if let Some(outcome) = identity_match(record, row) {
        return Some(outcome);
    }

    if kind == RecordKind::InstallmentPayment
        && tolerance_match(effective_amount, row, siblings, policy)
    {
        return Some(MatchOutcome::AmountTolerance);
    }

    None
}

/// Extracts the sale id from a `DIST-{saleId}-{n}` distribution id.
fn extract_sale_id(distribution_id: &str) -> Option<&str> {
    let rest = distribution_id.strip_prefix("DIST-")?;
    let (sale, seq) = rest.rsplit_once('-')?;
    if !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()) && !sale.is_empty() {
        Some(sale)
    } else {
        None
    }
}

/// Returns true if the note mentions one of the row's products.
///
/// The comparison uses the cleaned product name: the text before any
/// parenthesis, lower-cased. A full cleaned-name mention counts, as does
/// any single keyword of it longer than three characters.
fn note_mentions_product(note: &str, row: &SaleRow) -> bool {
    let note_lc = note.to_lowercase();

    row.entries.iter().any(|entry| {
        let cleaned = cleaned_product_name(&entry.product_name);
        if cleaned.is_empty() {
            return false;
        }
        if note_lc.contains(&cleaned) {
            return true;
        }
        cleaned
            .split_whitespace()
            .any(|word| word.chars().count() > 3 && note_lc.contains(word))
    })
}

/// Lower-cases a product name and drops any parenthesized suffix.
fn cleaned_product_name(name: &str) -> String {
    let base = name.split('(').next().unwrap_or(name);
    base.trim().to_lowercase()
}
