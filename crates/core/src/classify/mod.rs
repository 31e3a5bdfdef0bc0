//! Note-driven transaction classification.
//!
//! The backend's `type`/`status` tags conflate sale-creation records,
//! payments, and savings events, so the free-text note is the primary
//! discriminator. The rules form an explicit ordered list (first match wins)
//! so the order itself is unit-testable away from any rendering code.

pub mod rules;
pub mod types;

pub use rules::{classify, effective_amount, effective_date};
pub use types::{ClassifyRules, RecordKind};
