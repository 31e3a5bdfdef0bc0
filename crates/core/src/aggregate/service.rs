//! The aggregation pass over one member.

use chrono::NaiveDate;
use kisti_shared::types::Taka;

use crate::attribution::{AttributionGuard, MatchPolicy, identity_match};
use crate::calendar;
use crate::classify::{ClassifyRules, RecordKind, classify, effective_amount, effective_date};
use crate::record::TransactionRecord;
use crate::sale::{Member, RowStatus, SaleRow};

use super::diagnostics::Diagnostics;
use super::error::ReconcileWarning;
use super::types::{ColumnCell, RenderModel, RowView};

/// One record after classification and validation.
struct Classified<'a> {
    record: &'a TransactionRecord,
    kind: RecordKind,
    date: NaiveDate,
    amount: Taka,
}

/// Per-row accumulation state for one pass.
#[derive(Default)]
struct RowAccum {
    collected: Taka,
    savings_in: Taka,
    savings_out: Taka,
    /// Attributed savings events as (day, amount, is_deposit).
    savings_events: Vec<(NaiveDate, Taka, bool)>,
}

/// Aggregation service producing render models.
///
/// Pure business logic: the full transaction list for a member must be
/// materialized before a pass starts, and the pass runs to completion on
/// that immutable snapshot. The guard state is owned by the pass and
/// discarded with it; abandoning a pass leaves nothing to clean up.
pub struct AggregationService;

impl AggregationService {
    /// Runs one aggregation pass over one member.
    ///
    /// `columns` are the sheet's collection days (empty for callers that
    /// only want totals). Anomalies degrade locally and are reported via
    /// the model's diagnostics; this never fails.
    #[must_use]
    pub fn aggregate(
        member: &Member,
        records: &[TransactionRecord],
        columns: &[NaiveDate],
        policy: &MatchPolicy,
        rules: &ClassifyRules,
    ) -> RenderModel {
        let mut diagnostics = Diagnostics::default();
        let mut guard = AttributionGuard::new();

        let mut rows: Vec<&SaleRow> = member.sale_rows.iter().collect();
        rows.sort_by_key(|r| r.dofa);
        let mut accums: Vec<RowAccum> = rows.iter().map(|_| RowAccum::default()).collect();

        let classified = Self::classify_records(records, rules, &mut diagnostics);

        Self::attribute_payments(
            member,
            &rows,
            &mut accums,
            &classified,
            policy,
            &mut guard,
            &mut diagnostics,
        );
        Self::attribute_savings(member, &rows, &mut accums, &classified, &mut guard);

        let row_views =
            Self::build_rows(&rows, &accums, columns, policy, &mut diagnostics);

        let computed_savings: Taka = accums
            .iter()
            .map(|a| a.savings_in - a.savings_out)
            .sum();
        let savings_balance = member.total_savings.unwrap_or(computed_savings);

        diagnostics.guard_skips = guard.skipped();

        RenderModel {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            rows: row_views,
            savings_balance,
            diagnostics,
        }
    }

    /// Classifies and validates the records that participate in attribution.
    fn classify_records<'a>(
        records: &'a [TransactionRecord],
        rules: &ClassifyRules,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Classified<'a>> {
        let mut classified = Vec::new();

        for record in records {
            let kind = classify(record, rules);
            if !kind.is_attributable() {
                continue;
            }

            let amount = effective_amount(record);
            if amount.is_negative() {
                diagnostics.record(ReconcileWarning::InvalidAmount {
                    record_id: record.id.clone(),
                    amount: amount.amount(),
                });
                continue;
            }

            let Some(date) = effective_date(record, kind) else {
                diagnostics.record(ReconcileWarning::InvalidDate {
                    record_id: record.id.clone(),
                });
                continue;
            };

            classified.push(Classified {
                record,
                kind,
                date,
                amount,
            });
        }

        classified
    }

    /// Attributes loan installment payments to rows.
    ///
    /// Identity evidence is scanned across rows first; only when every row
    /// stays silent does the amount-tolerance scan run, and a record that
    /// fits several rows there goes to the first (logged as ambiguous, not
    /// silently picked).
    fn attribute_payments(
        member: &Member,
        rows: &[&SaleRow],
        accums: &mut [RowAccum],
        classified: &[Classified<'_>],
        policy: &MatchPolicy,
        guard: &mut AttributionGuard,
        diagnostics: &mut Diagnostics,
    ) {
        for item in classified
            .iter()
            .filter(|c| c.kind == RecordKind::InstallmentPayment)
        {
            let target = Self::payment_target(rows, item, policy, diagnostics);
            let Some(index) = target else {
                // No identity and no tolerable amount: excluded from every
                // row, never duplicated, never an error banner.
                continue;
            };

            if guard.try_claim(&member.id, item.date, &item.record.id) {
                accums[index].collected += item.amount;
            }
        }
    }

    /// Picks the row a payment belongs to, if any.
    fn payment_target(
        rows: &[&SaleRow],
        item: &Classified<'_>,
        policy: &MatchPolicy,
        diagnostics: &mut Diagnostics,
    ) -> Option<usize> {
        if let Some(index) = rows
            .iter()
            .position(|row| identity_match(item.record, row).is_some())
        {
            return Some(index);
        }

        // Rows without a real schedule never tolerance-match.
        let candidates: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                let expected = row.expected_installment();
                expected.is_positive() && policy.within_tolerance(item.amount, expected)
            })
            .map(|(i, _)| i)
            .collect();

        if candidates.len() > 1 {
            diagnostics.record(ReconcileWarning::AmbiguousAttribution {
                record_id: item.record.id.clone(),
                candidate_rows: candidates.len(),
            });
        }

        candidates.first().copied()
    }

    /// Attributes savings deposits and withdrawals to rows.
    ///
    /// Runs after payment attribution because the identity-less fallback
    /// targets the first row still taking collections.
    fn attribute_savings(
        member: &Member,
        rows: &[&SaleRow],
        accums: &mut [RowAccum],
        classified: &[Classified<'_>],
        guard: &mut AttributionGuard,
    ) {
        let first_active = rows
            .iter()
            .enumerate()
            .find(|(i, row)| !Self::is_fully_paid(accums[*i].collected, row.total_amount()))
            .map(|(i, _)| i);

        for item in classified.iter().filter(|c| c.kind.is_savings()) {
            let target = rows
                .iter()
                .position(|row| identity_match(item.record, row).is_some())
                .or_else(|| {
                    // A savings record with no disbursement link and no
                    // product hint belongs to the first active row, or the
                    // first row when nothing is active.
                    if item.record.distribution_id.is_none() {
                        first_active.or(if rows.is_empty() { None } else { Some(0) })
                    } else {
                        None
                    }
                });

            let Some(index) = target else {
                continue;
            };

            if guard.try_claim(&member.id, item.date, &item.record.id) {
                let accum = &mut accums[index];
                let is_deposit = item.kind == RecordKind::SavingsDeposit;
                if is_deposit {
                    accum.savings_in += item.amount;
                } else {
                    accum.savings_out += item.amount;
                }
                accum.savings_events.push((item.date, item.amount, is_deposit));
            }
        }
    }

    /// Builds the row views: caps, statuses, the transfer rule, columns.
    fn build_rows(
        rows: &[&SaleRow],
        accums: &[RowAccum],
        columns: &[NaiveDate],
        policy: &MatchPolicy,
        diagnostics: &mut Diagnostics,
    ) -> Vec<RowView> {
        let mut views = Vec::with_capacity(rows.len());
        let mut carry = Taka::ZERO;

        for (row, accum) in rows.iter().zip(accums) {
            let total = row.total_amount();
            let paid = accum.collected.min(total);
            if accum.collected > total {
                diagnostics.record(ReconcileWarning::OverCollection {
                    sale_id: row.sale_id.clone(),
                    excess: accum.collected - total,
                });
            }

            let fully_paid = Self::is_fully_paid(accum.collected, total);
            let status = if fully_paid {
                RowStatus::FullyPaid
            } else {
                RowStatus::Active
            };

            // Transfer rule: a fully-paid row's net savings carries forward
            // to the next active row as an explicit opening line. The
            // completed row keeps its own direct figures for the audit
            // trail, signed as they fall out.
            let mut opening_transfer = None;
            if fully_paid {
                carry += accum.savings_in - accum.savings_out;
            } else if !carry.is_zero() {
                opening_transfer = Some(carry);
                carry = Taka::ZERO;
            }

            let cells = if fully_paid {
                Vec::new()
            } else {
                Self::build_columns(row, accum, columns, policy)
            };

            views.push(RowView {
                sale_id: row.sale_id.clone(),
                dofa: row.dofa,
                product_names: row.product_names(),
                total_amount: total,
                installment_count: row.total_installments(),
                paid_amount: paid,
                pending_amount: total.saturating_sub(paid),
                status,
                savings_in: accum.savings_in,
                savings_out: accum.savings_out,
                opening_transfer,
                columns: cells,
            });
        }

        views
    }

    /// Builds one active row's sheet cells.
    fn build_columns(
        row: &SaleRow,
        accum: &RowAccum,
        columns: &[NaiveDate],
        policy: &MatchPolicy,
    ) -> Vec<ColumnCell> {
        let delivery = row.delivery_date();
        let expected = row.expected_installment();

        // Each savings event lands in the nearest column that passes the
        // date gate; ties go to the earlier column.
        let mut placed: Vec<(Taka, Taka)> = vec![(Taka::ZERO, Taka::ZERO); columns.len()];
        for &(date, amount, is_deposit) in &accum.savings_events {
            let best = columns
                .iter()
                .enumerate()
                .filter(|(_, &col)| policy.date_gate_passes(date, col))
                .min_by_key(|(_, &col)| calendar::day_distance(date, col));
            if let Some((index, _)) = best {
                if is_deposit {
                    placed[index].0 += amount;
                } else {
                    placed[index].1 += amount;
                }
            }
        }

        columns
            .iter()
            .zip(placed)
            .map(|(&date, (savings_in, savings_out))| match delivery {
                // Dues start strictly after delivery; before that (or when
                // delivery is unknown) the cell is blank, not zero.
                Some(delivered) if date > delivered => ColumnCell {
                    date,
                    loan: Some(expected),
                    savings_in: Some(savings_in),
                    savings_out: Some(savings_out),
                },
                _ => ColumnCell::blank(date),
            })
            .collect()
    }

    /// A row is fully paid once collections reach its (positive) total.
    fn is_fully_paid(collected: Taka, total: Taka) -> bool {
        total.is_positive() && collected >= total
    }
}
