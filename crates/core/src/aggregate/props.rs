//! Property-based tests for the aggregation pass.

use chrono::NaiveDate;
use kisti_shared::types::{MemberId, RecordId, SaleId, Taka};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::attribution::MatchPolicy;
use crate::classify::ClassifyRules;
use crate::record::{InstallmentKind, RecordStatus, TransactionRecord};
use crate::sale::{InstallmentFrequency, Member, ProductEntry, SaleRow};

use super::service::AggregationService;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
}

fn single_row_member(total: i64, installments: u32, delivery: Option<NaiveDate>) -> Member {
    Member {
        id: MemberId::new("m-1"),
        name: "Amina Begum".to_string(),
        total_savings: None,
        sale_rows: vec![SaleRow {
            sale_id: SaleId::new("s-1"),
            dofa: 1,
            entries: vec![ProductEntry {
                product_name: "Rice Cooker".to_string(),
                total_amount: Taka::from_whole(total),
                total_installments: installments,
                frequency: InstallmentFrequency::Weekly,
                delivery_date: delivery,
                distribution_id: None,
            }],
        }],
    }
}

fn named_payment(id: &str, amount: i64, collected: NaiveDate) -> TransactionRecord {
    TransactionRecord {
        id: RecordId::new(id),
        amount: Taka::from_whole(amount),
        paid_amount: None,
        kind: InstallmentKind::Regular,
        status: RecordStatus::Collected,
        note: "Product Loan: Rice Cooker installment".to_string(),
        distribution_id: None,
        collection_date: Some(collected),
        due_date: None,
        created_date: None,
        auto_deducted: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **No double counting.**
    ///
    /// *For any* set of payment records, possibly containing duplicates, a
    /// record's effective amount is credited either once or not at all. With
    /// an uncappable row total, the paid figure equals the sum of distinct
    /// records and the guard absorbs exactly the duplicates.
    #[test]
    fn prop_no_double_counting(
        amounts in prop::collection::vec(1i64..500, 1..12),
        duplicates in 0usize..4,
    ) {
        let member = single_row_member(10_000_000, 100, None);

        let mut records: Vec<TransactionRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| named_payment(&format!("r-{i}"), amount, day(8)))
            .collect();
        for i in 0..duplicates.min(records.len()) {
            let dup = records[i].clone();
            records.push(dup);
        }
        let duplicated = records.len() - amounts.len();

        let model = AggregationService::aggregate(
            &member,
            &records,
            &[],
            &MatchPolicy::sheet(),
            &ClassifyRules::default(),
        );

        let expected: Taka = amounts.iter().map(|&a| Taka::from_whole(a)).sum();
        prop_assert_eq!(model.rows[0].paid_amount, expected);
        prop_assert_eq!(model.diagnostics.guard_skips as usize, duplicated);
    }

    /// **Cap invariant.**
    ///
    /// *For any* row and payment set, after aggregation
    /// `0 <= paid <= total` and `pending = total - paid` hold exactly.
    #[test]
    fn prop_cap_invariant(
        total in 100i64..5_000,
        installments in 1u32..40,
        amounts in prop::collection::vec(1i64..2_000, 0..10),
    ) {
        let member = single_row_member(total, installments, None);
        let records: Vec<TransactionRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| named_payment(&format!("r-{i}"), amount, day(8)))
            .collect();

        let model = AggregationService::aggregate(
            &member,
            &records,
            &[],
            &MatchPolicy::sheet(),
            &ClassifyRules::default(),
        );
        let row = &model.rows[0];

        prop_assert!(row.paid_amount.amount() >= Decimal::ZERO);
        prop_assert!(row.paid_amount <= row.total_amount);
        prop_assert_eq!(
            row.pending_amount,
            row.total_amount - row.paid_amount
        );

        // Capping and the over-collection diagnostic agree.
        let collected: Taka = amounts.iter().map(|&a| Taka::from_whole(a)).sum();
        if collected > row.total_amount {
            prop_assert_eq!(model.diagnostics.over_collections, 1);
        } else {
            prop_assert_eq!(model.diagnostics.over_collections, 0);
        }
    }

    /// **Blank before delivery.**
    ///
    /// *For any* delivery day and column set, every column on or before the
    /// delivery day renders blank, never zero; every later column carries
    /// figures.
    #[test]
    fn prop_blank_before_delivery(
        delivery_day in 1u32..28,
        column_days in prop::collection::btree_set(1u32..29, 1..10),
        amounts in prop::collection::vec(1i64..500, 0..5),
    ) {
        let delivery = day(delivery_day);
        let columns: Vec<NaiveDate> = column_days.iter().map(|&d| day(d)).collect();
        let member = single_row_member(1_000_000, 100, Some(delivery));
        let records: Vec<TransactionRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| named_payment(&format!("r-{i}"), amount, day(14)))
            .collect();

        let model = AggregationService::aggregate(
            &member,
            &records,
            &columns,
            &MatchPolicy::sheet(),
            &ClassifyRules::default(),
        );

        for cell in &model.rows[0].columns {
            if cell.date <= delivery {
                prop_assert!(cell.is_blank(), "column {} should be blank", cell.date);
            } else {
                prop_assert!(cell.loan.is_some());
                prop_assert!(cell.savings_in.is_some());
                prop_assert!(cell.savings_out.is_some());
            }
        }
    }

    /// **Attribution totals are conservative.**
    ///
    /// *For any* payment set spread over several rows, the sum of uncapped
    /// row collections never exceeds the sum of record amounts.
    #[test]
    fn prop_attribution_conservative(
        amounts in prop::collection::vec(1i64..500, 0..10),
    ) {
        let member = Member {
            id: MemberId::new("m-1"),
            name: "Amina Begum".to_string(),
            total_savings: None,
            sale_rows: vec![
                SaleRow {
                    sale_id: SaleId::new("s-1"),
                    dofa: 1,
                    entries: vec![ProductEntry {
                        product_name: "Fan".to_string(),
                        total_amount: Taka::from_whole(1_000_000),
                        total_installments: 100,
                        frequency: InstallmentFrequency::Weekly,
                        delivery_date: None,
                        distribution_id: None,
                    }],
                },
                SaleRow {
                    sale_id: SaleId::new("s-2"),
                    dofa: 2,
                    entries: vec![ProductEntry {
                        product_name: "Stove".to_string(),
                        total_amount: Taka::from_whole(1_000_000),
                        total_installments: 100,
                        frequency: InstallmentFrequency::Weekly,
                        delivery_date: None,
                        distribution_id: None,
                    }],
                },
            ],
        };

        let records: Vec<TransactionRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                let mut rec = named_payment(&format!("r-{i}"), amount, day(8));
                // Alternate the product named in the note across rows.
                rec.note = if i % 2 == 0 {
                    "Product Loan: Fan installment".to_string()
                } else {
                    "Product Loan: Stove installment".to_string()
                };
                rec
            })
            .collect();

        let model = AggregationService::aggregate(
            &member,
            &records,
            &[],
            &MatchPolicy::sheet(),
            &ClassifyRules::default(),
        );

        let credited: Taka = model.rows.iter().map(|r| r.paid_amount).sum();
        let supplied: Taka = amounts.iter().map(|&a| Taka::from_whole(a)).sum();
        prop_assert!(credited <= supplied);
    }
}
