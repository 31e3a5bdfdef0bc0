//! Render-model types handed to the rendering layer.

use chrono::NaiveDate;
use kisti_shared::types::{MemberId, SaleId, Taka};
use serde::Serialize;

use crate::sale::RowStatus;

use super::diagnostics::Diagnostics;

/// One sheet cell: a date column's figures for one row.
///
/// `None` renders blank and means "not yet applicable" (the column sits on
/// or before the row's delivery day, or delivery is unknown). `Some(zero)`
/// means "applicable and nothing happened"; the distinction is deliberate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCell {
    /// The column's collection day.
    pub date: NaiveDate,
    /// Scheduled installment due on this day.
    pub loan: Option<Taka>,
    /// Savings actually deposited on this day.
    pub savings_in: Option<Taka>,
    /// Savings actually withdrawn on this day.
    pub savings_out: Option<Taka>,
}

impl ColumnCell {
    /// A blank, not-yet-applicable cell.
    #[must_use]
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            loan: None,
            savings_in: None,
            savings_out: None,
        }
    }

    /// Returns true when all three figures are blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.loan.is_none() && self.savings_in.is_none() && self.savings_out.is_none()
    }
}

/// One product-sale row's aggregated view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    /// The sale this row renders.
    pub sale_id: SaleId,
    /// Display-ordering sequence number.
    pub dofa: u32,
    /// Names of the bundled products.
    pub product_names: Vec<String>,
    /// Combined credit price.
    pub total_amount: Taka,
    /// Number of installments.
    pub installment_count: u32,
    /// Collected so far, capped at the total.
    pub paid_amount: Taka,
    /// Still outstanding; never negative.
    pub pending_amount: Taka,
    /// Active or fully paid.
    pub status: RowStatus,
    /// Savings deposited directly against this row.
    pub savings_in: Taka,
    /// Savings withdrawn directly against this row.
    pub savings_out: Taka,
    /// Balance inherited from earlier fully-paid rows, shown as an explicit
    /// "opening balance (transferred)" line, never merged into the direct
    /// figures above.
    pub opening_transfer: Option<Taka>,
    /// Per-column sheet cells; empty for fully-paid rows.
    pub columns: Vec<ColumnCell>,
}

impl RowView {
    /// This row's own savings balance, excluding any inherited transfer.
    ///
    /// May go negative on a completed row whose deposits were transferred
    /// onward while withdrawals stayed behind; that signed figure is kept
    /// as-is for the audit trail.
    #[must_use]
    pub fn direct_net_savings(&self) -> Taka {
        self.savings_in - self.savings_out
    }

    /// The savings balance shown against this row, transfer included.
    #[must_use]
    pub fn displayed_savings(&self) -> Taka {
        self.direct_net_savings() + self.opening_transfer.unwrap_or(Taka::ZERO)
    }
}

/// One member's aggregated view: the unit handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    /// The member this model renders.
    pub member_id: MemberId,
    /// Member display name.
    pub member_name: String,
    /// All rows in dofa order, fully-paid ones included.
    pub rows: Vec<RowView>,
    /// The member-level savings balance: the backend's authoritative figure
    /// when available, a self-computed sum otherwise.
    pub savings_balance: Taka,
    /// Anomalies recovered during the pass.
    pub diagnostics: Diagnostics,
}

impl RenderModel {
    /// The rows still taking collections.
    pub fn active_rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(|r| r.status.is_active())
    }
}
