//! Record-to-row attribution.
//!
//! Payment and savings records carry anything from an authoritative
//! distribution id down to nothing but an amount, so attribution runs a
//! layered fallback: strongest signal first, each layer only consulted when
//! every stronger one stays silent. The double-counting guard makes the
//! whole pass idempotent per record.

pub mod guard;
pub mod matcher;
pub mod policy;

pub use guard::AttributionGuard;
pub use matcher::{MatchOutcome, identity_match, match_record, tolerance_match};
pub use policy::{DateGate, MatchPolicy};
