//! Domain types for product sales and members.

use chrono::NaiveDate;
use kisti_shared::types::{DistributionId, MemberId, SaleId, Taka};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How often installments on a sale fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentFrequency {
    /// An installment every collection day.
    Daily,
    /// An installment every week.
    Weekly,
    /// An installment every month.
    Monthly,
}

/// One product inside a sale bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Display name of the product.
    pub product_name: String,
    /// Total credit price of this product.
    pub total_amount: Taka,
    /// Number of installments the price is spread over.
    pub total_installments: u32,
    /// Installment rhythm.
    pub frequency: InstallmentFrequency,
    /// Day the product was handed over; dues start after this day.
    pub delivery_date: Option<NaiveDate>,
    /// Disbursement identifier; authoritative for payment matching when
    /// present, absent on legacy sales.
    pub distribution_id: Option<DistributionId>,
}

/// Lifecycle of a product row within this subsystem.
///
/// `FullyPaid` is terminal here; a refund or correction would arrive as a
/// new backend event, not as a reversal of this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Collections still outstanding.
    Active,
    /// Collected up to the total; excluded from active display.
    FullyPaid,
}

impl RowStatus {
    /// Returns true while the row still takes collections.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One displayed row of the collection sheet: a sale bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    /// The sale transaction this bundle belongs to.
    pub sale_id: SaleId,
    /// Per-sale display-ordering sequence number.
    pub dofa: u32,
    /// The bundled products.
    pub entries: Vec<ProductEntry>,
}

impl SaleRow {
    /// Combined credit price of the bundle.
    #[must_use]
    pub fn total_amount(&self) -> Taka {
        self.entries.iter().map(|e| e.total_amount).sum()
    }

    /// Number of installments the bundle is collected over.
    ///
    /// Bundled products are sold on one schedule; entries normally agree,
    /// and the longest schedule wins when legacy data disagrees.
    #[must_use]
    pub fn total_installments(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.total_installments)
            .max()
            .unwrap_or(0)
    }

    /// The expected per-installment amount, rounded to whole taka.
    #[must_use]
    pub fn expected_installment(&self) -> Taka {
        let installments = self.total_installments();
        if installments == 0 {
            return Taka::ZERO;
        }
        let expected = (self.total_amount().amount() / Decimal::from(installments))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Taka::new(expected)
    }

    /// Names of the bundled products, in entry order.
    #[must_use]
    pub fn product_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.product_name.clone()).collect()
    }

    /// Day collections on this row become applicable: the earliest delivery
    /// day among the bundle's entries, or `None` when no entry carries one.
    #[must_use]
    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.entries.iter().filter_map(|e| e.delivery_date).min()
    }

    /// Returns true if any entry carries the given distribution id.
    #[must_use]
    pub fn has_distribution_id(&self, id: &DistributionId) -> bool {
        self.entries
            .iter()
            .any(|e| e.distribution_id.as_ref() == Some(id))
    }

    /// The distribution ids of the bundle's entries.
    pub fn distribution_ids(&self) -> impl Iterator<Item = &DistributionId> {
        self.entries.iter().filter_map(|e| e.distribution_id.as_ref())
    }
}

/// A member with their sale rows and authoritative savings balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Backend-issued member identifier.
    pub id: MemberId,
    /// Member display name.
    pub name: String,
    /// Authoritative running savings balance from the backend. Preferred
    /// over any self-computed sum; `None` only on legacy data.
    pub total_savings: Option<Taka>,
    /// The member's sale rows in dofa order.
    pub sale_rows: Vec<SaleRow>,
}
