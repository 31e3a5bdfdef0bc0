//! Classification outcome and rule configuration types.

use serde::{Deserialize, Serialize};

/// What a transaction record represents, once classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// The record documenting a product sale itself; never a payment.
    SaleCreation,
    /// A loan installment payment against a product sale.
    InstallmentPayment,
    /// A savings deposit.
    SavingsDeposit,
    /// A savings withdrawal.
    SavingsWithdrawal,
    /// Anything the reconciliation must not count.
    Ignorable,
}

impl RecordKind {
    /// Returns true for the kinds that participate in attribution.
    #[must_use]
    pub fn is_attributable(self) -> bool {
        matches!(
            self,
            Self::InstallmentPayment | Self::SavingsDeposit | Self::SavingsWithdrawal
        )
    }

    /// Returns true for the savings kinds.
    #[must_use]
    pub fn is_savings(self) -> bool {
        matches!(self, Self::SavingsDeposit | Self::SavingsWithdrawal)
    }
}

/// The note phrases the classifier keys on.
///
/// Field staff enter notes through the console, so the phrasing is stable in
/// practice, but it is still operator-entered text; keeping the phrases as
/// data lets tests probe rule ordering and lets deployments extend the
/// locale-specific keywords without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRules {
    /// Marker identifying sale-creation notes.
    pub sale_marker: String,
    /// Marker identifying an embedded sale identifier.
    pub sale_id_marker: String,
    /// Marker identifying savings collections.
    pub savings_collection_marker: String,
    /// Locale-specific savings keywords (Bengali in production).
    pub savings_keywords: Vec<String>,
    /// Marker identifying savings withdrawals.
    pub withdrawal_marker: String,
    /// Marker identifying registration-time opening balances.
    pub initial_savings_marker: String,
    /// Phrases identifying loan installment payments.
    pub loan_payment_phrases: Vec<String>,
    /// Words whose presence disqualifies a note as a standalone deposit.
    pub savings_exclusions: Vec<String>,
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self {
            sale_marker: "Product Sale:".to_string(),
            sale_id_marker: "SaleID:".to_string(),
            savings_collection_marker: "Savings Collection".to_string(),
            savings_keywords: vec!["\u{09b8}\u{099e}\u{09cd}\u{099a}\u{09af}\u{09bc}".to_string()],
            withdrawal_marker: "Savings Withdrawal".to_string(),
            initial_savings_marker: "Initial Savings".to_string(),
            loan_payment_phrases: vec![
                "Product Loan".to_string(),
                "Installment".to_string(),
                "Full Payment".to_string(),
                "Partial Payment".to_string(),
            ],
            savings_exclusions: vec![
                "Product".to_string(),
                "Loan".to_string(),
                "Withdrawal".to_string(),
            ],
        }
    }
}
