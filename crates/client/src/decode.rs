//! Boundary decode from wire DTOs into strict domain types.
//!
//! A record is kept in degraded form when salvageable (an unreadable date
//! becomes `None` plus a warning) and dropped when not (no usable amount).
//! Either way one bad record degrades only its own contribution; the rest
//! of the member's data decodes normally.

use std::collections::HashMap;

use kisti_core::aggregate::ReconcileWarning;
use kisti_core::calendar;
use kisti_core::record::{InstallmentKind, RecordStatus, TransactionRecord};
use kisti_core::sale::{InstallmentFrequency, Member, ProductEntry, SaleRow};
use chrono::NaiveDate;
use kisti_shared::types::{DistributionId, MemberId, RecordId, SaleId, Taka};
use rust_decimal::Decimal;

use crate::models::{MemberDto, ProductDto, TransactionDto};

/// The outcome of decoding one member's transaction list.
#[derive(Debug, Default)]
pub struct DecodedRecords {
    /// The records that survived decoding.
    pub records: Vec<TransactionRecord>,
    /// Anomalies recovered along the way.
    pub warnings: Vec<ReconcileWarning>,
}

/// Decodes a member's transaction list.
#[must_use]
pub fn decode_records(dtos: Vec<TransactionDto>) -> DecodedRecords {
    let mut out = DecodedRecords::default();

    for dto in dtos {
        if let Some(record) = decode_record(dto, &mut out.warnings) {
            out.records.push(record);
        }
    }

    out
}

fn decode_record(
    dto: TransactionDto,
    warnings: &mut Vec<ReconcileWarning>,
) -> Option<TransactionRecord> {
    let id = RecordId::new(dto.id);

    let Some(amount) = dto.amount.filter(|a| !a.is_sign_negative()) else {
        warnings.push(ReconcileWarning::InvalidAmount {
            record_id: id,
            amount: dto.amount.unwrap_or(Decimal::ZERO),
        });
        return None;
    };

    let mut date_warned = false;
    let mut parse_date = |raw: &Option<String>| -> Option<NaiveDate> {
        let raw = raw.as_deref()?;
        match calendar::parse_calendar_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                // One warning per record, however many date fields are bad.
                if !date_warned {
                    warnings.push(ReconcileWarning::InvalidDate {
                        record_id: id.clone(),
                    });
                    date_warned = true;
                }
                None
            }
        }
    };

    let collection_date = parse_date(&dto.collection_date);
    let due_date = parse_date(&dto.due_date);
    let created_date = parse_date(&dto.created_at);

    Some(TransactionRecord {
        id,
        amount: Taka::new(amount),
        paid_amount: dto
            .paid_amount
            .filter(|a| !a.is_sign_negative())
            .map(Taka::new),
        kind: decode_kind(dto.installment_type.as_deref()),
        status: decode_status(dto.status.as_deref()),
        note: dto.note.unwrap_or_default(),
        distribution_id: dto
            .distribution_id
            .filter(|d| !d.is_empty())
            .map(DistributionId::new),
        collection_date,
        due_date,
        created_date,
        auto_deducted: dto.auto_deducted.unwrap_or(false),
    })
}

/// Records predating the tag were loan installments.
fn decode_kind(raw: Option<&str>) -> InstallmentKind {
    match raw {
        Some(s) if s.eq_ignore_ascii_case("extra") => InstallmentKind::Extra,
        _ => InstallmentKind::Regular,
    }
}

/// Legacy rows were written after the money was in hand.
fn decode_status(raw: Option<&str>) -> RecordStatus {
    match raw {
        Some(s) if s.eq_ignore_ascii_case("partial") => RecordStatus::Partial,
        Some(s) if s.eq_ignore_ascii_case("pending") => RecordStatus::Pending,
        _ => RecordStatus::Collected,
    }
}

/// Groups product entries into sale rows by their sale transaction.
///
/// Entries without a sale transaction id form single-product rows keyed by
/// their own id. Rows take the wire dofa when present, otherwise their
/// first-seen position.
#[must_use]
pub fn group_sale_rows(
    dtos: Vec<ProductDto>,
    warnings: &mut Vec<ReconcileWarning>,
) -> Vec<SaleRow> {
    let mut order: Vec<SaleId> = Vec::new();
    let mut groups: HashMap<SaleId, (Option<u32>, Vec<ProductEntry>)> = HashMap::new();

    for dto in dtos {
        let sale_id = SaleId::new(
            dto.sale_transaction_id
                .clone()
                .unwrap_or_else(|| dto.id.clone()),
        );
        let dofa = dto.dofa;

        let Some(entry) = decode_product(dto, warnings) else {
            continue;
        };

        let group = groups.entry(sale_id.clone()).or_insert_with(|| {
            order.push(sale_id);
            (None, Vec::new())
        });
        if group.0.is_none() {
            group.0 = dofa;
        }
        group.1.push(entry);
    }

    let mut rows: Vec<SaleRow> = order
        .iter()
        .enumerate()
        .filter_map(|(position, sale_id)| {
            let (dofa, entries) = groups.remove(sale_id)?;
            let position = u32::try_from(position).unwrap_or(u32::MAX);
            Some(SaleRow {
                sale_id: sale_id.clone(),
                dofa: dofa.unwrap_or(position.saturating_add(1)),
                entries,
            })
        })
        .collect();
    rows.sort_by_key(|r| r.dofa);
    rows
}

fn decode_product(
    dto: ProductDto,
    warnings: &mut Vec<ReconcileWarning>,
) -> Option<ProductEntry> {
    let Some(total) = dto.total_amount.filter(|a| !a.is_sign_negative()) else {
        // A product without a price backs no dues; its sale-creation record
        // id stands in for it in the warning.
        warnings.push(ReconcileWarning::InvalidAmount {
            record_id: RecordId::new(dto.id),
            amount: dto.total_amount.unwrap_or(Decimal::ZERO),
        });
        return None;
    };

    let delivery_date = match dto.delivery_date.as_deref() {
        None => None,
        Some(raw) => match calendar::parse_calendar_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                warnings.push(ReconcileWarning::InvalidDate {
                    record_id: RecordId::new(dto.id.clone()),
                });
                None
            }
        },
    };

    Some(ProductEntry {
        product_name: dto.product_name.unwrap_or_default(),
        total_amount: Taka::new(total),
        total_installments: dto.total_installments.unwrap_or(1),
        frequency: decode_frequency(dto.installment_frequency.as_deref()),
        delivery_date,
        distribution_id: dto
            .distribution_id
            .filter(|d| !d.is_empty())
            .map(DistributionId::new),
    })
}

fn decode_frequency(raw: Option<&str>) -> InstallmentFrequency {
    match raw {
        Some(s) if s.eq_ignore_ascii_case("daily") => InstallmentFrequency::Daily,
        Some(s) if s.eq_ignore_ascii_case("monthly") => InstallmentFrequency::Monthly,
        _ => InstallmentFrequency::Weekly,
    }
}

/// Builds the domain member from its DTO and grouped sale rows.
#[must_use]
pub fn decode_member(dto: MemberDto, sale_rows: Vec<SaleRow>) -> Member {
    Member {
        id: MemberId::new(dto.id),
        name: dto.name.unwrap_or_default(),
        total_savings: dto.total_savings.map(Taka::new),
        sale_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transaction_json(json: &str) -> TransactionDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_record_normalizes_dates_through_dhaka() {
        let dto = transaction_json(
            r#"{
                "id": "r-1",
                "amount": 210,
                "type": "regular",
                "status": "collected",
                "note": "Product Loan: Rice Cooker",
                "collectionDate": "2026-04-07T20:30:00Z"
            }"#,
        );

        let out = decode_records(vec![dto]);
        assert!(out.warnings.is_empty());

        // 20:30Z is already the 8th in Dhaka.
        let record = &out.records[0];
        assert_eq!(
            record.collection_date,
            Some(chrono::NaiveDate::from_ymd_opt(2026, 4, 8).unwrap())
        );
        assert_eq!(record.amount, Taka::new(dec!(210)));
    }

    #[test]
    fn test_decode_record_missing_amount_is_dropped() {
        let dto = transaction_json(r#"{"id": "r-1", "note": "Savings Collection"}"#);
        let out = decode_records(vec![dto]);

        assert!(out.records.is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert!(matches!(
            out.warnings[0],
            ReconcileWarning::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_decode_record_bad_date_degrades_with_one_warning() {
        let dto = transaction_json(
            r#"{
                "id": "r-1",
                "amount": 100,
                "collectionDate": "not a date",
                "dueDate": "also not a date"
            }"#,
        );
        let out = decode_records(vec![dto]);

        // Record kept in degraded form, one warning for the whole record.
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].collection_date, None);
        assert_eq!(out.records[0].due_date, None);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_decode_record_legacy_defaults() {
        let dto = transaction_json(r#"{"_id": "r-1", "amount": 100}"#);
        let out = decode_records(vec![dto]);
        let record = &out.records[0];

        assert_eq!(record.kind, InstallmentKind::Regular);
        assert_eq!(record.status, RecordStatus::Collected);
        assert_eq!(record.note, "");
        assert!(!record.auto_deducted);
    }

    #[test]
    fn test_group_sale_rows_bundles_by_sale_transaction() {
        let products: Vec<ProductDto> = serde_json::from_str(
            r#"[
                {"id": "p-1", "productName": "Rice Cooker", "totalAmount": 1600,
                 "totalInstallments": 8, "saleTransactionId": "s-1", "dofa": 1},
                {"id": "p-2", "productName": "Fan", "totalAmount": 800,
                 "totalInstallments": 8, "saleTransactionId": "s-1", "dofa": 1},
                {"id": "p-3", "productName": "Stove", "totalAmount": 1000,
                 "totalInstallments": 10, "saleTransactionId": "s-2", "dofa": 2}
            ]"#,
        )
        .unwrap();

        let mut warnings = Vec::new();
        let rows = group_sale_rows(products, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sale_id, SaleId::new("s-1"));
        assert_eq!(rows[0].entries.len(), 2);
        assert_eq!(rows[0].total_amount(), Taka::new(dec!(2400)));
        assert_eq!(rows[1].sale_id, SaleId::new("s-2"));
    }

    #[test]
    fn test_group_sale_rows_legacy_single_products() {
        // Entries without a sale transaction id become their own rows with
        // positional dofa.
        let products: Vec<ProductDto> = serde_json::from_str(
            r#"[
                {"id": "p-1", "productName": "Rice Cooker", "totalAmount": 1600},
                {"id": "p-2", "productName": "Fan", "totalAmount": 800}
            ]"#,
        )
        .unwrap();

        let mut warnings = Vec::new();
        let rows = group_sale_rows(products, &mut warnings);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sale_id, SaleId::new("p-1"));
        assert_eq!(rows[0].dofa, 1);
        assert_eq!(rows[1].dofa, 2);
    }

    #[test]
    fn test_group_sale_rows_drops_priceless_product() {
        let products: Vec<ProductDto> =
            serde_json::from_str(r#"[{"id": "p-1", "productName": "Fan"}]"#).unwrap();

        let mut warnings = Vec::new();
        let rows = group_sale_rows(products, &mut warnings);

        assert!(rows.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_decode_member() {
        let dto: MemberDto =
            serde_json::from_str(r#"{"_id": "m-1", "name": "Amina Begum", "totalSavings": 300}"#)
                .unwrap();
        let member = decode_member(dto, Vec::new());

        assert_eq!(member.id, MemberId::new("m-1"));
        assert_eq!(member.total_savings, Some(Taka::new(dec!(300))));
    }
}
