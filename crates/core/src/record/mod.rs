//! Transaction record domain types.
//!
//! Records are created by the field-office backend and are read-only here.
//! The loose historical wire shapes are decoded into this strict form at the
//! API boundary; everything downstream works on these types alone.

pub mod types;

pub use types::{InstallmentKind, RecordStatus, TransactionRecord};
