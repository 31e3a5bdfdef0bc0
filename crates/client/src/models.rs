//! Wire DTOs for the backend's REST responses.
//!
//! Deserialization is deliberately tolerant: everything beyond the id is
//! optional, historical field names are accepted as aliases, and unknown
//! fields are ignored. Validation happens in `decode`, not here.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One transaction record as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    /// Record identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Face amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Actually-collected portion for partial payments.
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    /// Coarse tag; old records used `installmentType` for the same value.
    #[serde(default, rename = "type", alias = "installmentType")]
    pub installment_type: Option<String>,
    /// Collection status.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-text annotation.
    #[serde(default)]
    pub note: Option<String>,
    /// Disbursement link.
    #[serde(default)]
    pub distribution_id: Option<String>,
    /// Collection timestamp or date.
    #[serde(default)]
    pub collection_date: Option<String>,
    /// Scheduled due timestamp or date.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// True for amounts deducted automatically from savings.
    #[serde(default)]
    pub auto_deducted: Option<bool>,
}

/// One sold product as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Product entry identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Total credit price.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Number of installments.
    #[serde(default)]
    pub total_installments: Option<u32>,
    /// Installment rhythm.
    #[serde(default)]
    pub installment_frequency: Option<String>,
    /// Delivery timestamp or date.
    #[serde(default)]
    pub delivery_date: Option<String>,
    /// Disbursement identifier.
    #[serde(default)]
    pub distribution_id: Option<String>,
    /// The checkout this product was bundled into.
    #[serde(default)]
    pub sale_transaction_id: Option<String>,
    /// Per-sale display-ordering sequence number.
    #[serde(default)]
    pub dofa: Option<u32>,
}

/// One member as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    /// Member identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Authoritative running savings balance.
    #[serde(default)]
    pub total_savings: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_dto_accepts_legacy_shape() {
        // Legacy records: mongo `_id`, `installmentType`, no distribution id.
        let json = r#"{
            "_id": "64aa01",
            "amount": 210,
            "installmentType": "regular",
            "status": "collected",
            "note": "Product Loan: Rice Cooker",
            "collectionDate": "2026-04-08T09:30:00Z",
            "someFutureField": true
        }"#;

        let dto: TransactionDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.id, "64aa01");
        assert_eq!(dto.amount, Some(dec!(210)));
        assert_eq!(dto.installment_type.as_deref(), Some("regular"));
        assert_eq!(dto.distribution_id, None);
        assert_eq!(dto.auto_deducted, None);
    }

    #[test]
    fn test_transaction_dto_accepts_current_shape() {
        let json = r#"{
            "id": "r-9",
            "amount": "500.00",
            "paidAmount": "120.00",
            "type": "regular",
            "status": "partial",
            "note": "Partial Payment",
            "distributionId": "DIST-s-1-2",
            "dueDate": "2026-04-10",
            "autoDeducted": true
        }"#;

        let dto: TransactionDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.paid_amount, Some(dec!(120.00)));
        assert_eq!(dto.distribution_id.as_deref(), Some("DIST-s-1-2"));
        assert_eq!(dto.auto_deducted, Some(true));
    }

    #[test]
    fn test_product_dto_minimal() {
        let dto: ProductDto = serde_json::from_str(r#"{"_id": "p-1"}"#).unwrap();
        assert_eq!(dto.id, "p-1");
        assert_eq!(dto.product_name, None);
        assert_eq!(dto.sale_transaction_id, None);
    }

    #[test]
    fn test_member_dto() {
        let json = r#"{"_id": "m-1", "name": "Amina Begum", "totalSavings": 750.5}"#;
        let dto: MemberDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.name.as_deref(), Some("Amina Begum"));
        assert_eq!(dto.total_savings, Some(dec!(750.5)));
    }
}
