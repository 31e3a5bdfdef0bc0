//! The double-counting guard.
//!
//! One aggregation pass may test the same record against several rows and
//! several date columns. The guard owns the "already attributed" state for
//! the pass: scope-owned, created empty per member, discarded afterwards.
//! It is never shared across members and never outlives a pass.

use std::collections::HashSet;

use chrono::NaiveDate;
use kisti_shared::types::{MemberId, RecordId};

/// Pass-scoped set of already-attributed records.
#[derive(Debug, Default)]
pub struct AttributionGuard {
    claimed: HashSet<(MemberId, NaiveDate, RecordId)>,
    skipped: u32,
}

impl AttributionGuard {
    /// Creates an empty guard for one member's pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a record for a row.
    ///
    /// Returns true when the record was free and is now claimed; false when
    /// it was already attributed elsewhere in this pass, in which case the
    /// skip counter advances and the caller must not credit the record
    /// again. A duplicate claim is an expected occurrence, not an error.
    pub fn try_claim(&mut self, member: &MemberId, date: NaiveDate, record: &RecordId) -> bool {
        let fresh = self
            .claimed
            .insert((member.clone(), date, record.clone()));
        if !fresh {
            self.skipped += 1;
        }
        fresh
    }

    /// Returns true if the record is already claimed, without claiming it.
    #[must_use]
    pub fn is_claimed(&self, member: &MemberId, date: NaiveDate, record: &RecordId) -> bool {
        self.claimed
            .contains(&(member.clone(), date, record.clone()))
    }

    /// Number of duplicate claims rejected so far.
    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Number of records claimed so far.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn test_first_claim_succeeds_second_is_skipped() {
        let mut guard = AttributionGuard::new();
        let member = MemberId::new("m-1");
        let record = RecordId::new("r-1");

        assert!(guard.try_claim(&member, day(5), &record));
        assert!(!guard.try_claim(&member, day(5), &record));
        assert_eq!(guard.skipped(), 1);
        assert_eq!(guard.claimed_count(), 1);
    }

    #[test]
    fn test_claims_are_keyed_by_date_and_record() {
        let mut guard = AttributionGuard::new();
        let member = MemberId::new("m-1");

        assert!(guard.try_claim(&member, day(5), &RecordId::new("r-1")));
        assert!(guard.try_claim(&member, day(6), &RecordId::new("r-1")));
        assert!(guard.try_claim(&member, day(5), &RecordId::new("r-2")));
        assert_eq!(guard.skipped(), 0);
        assert_eq!(guard.claimed_count(), 3);
    }

    #[test]
    fn test_is_claimed_does_not_claim() {
        let mut guard = AttributionGuard::new();
        let member = MemberId::new("m-1");
        let record = RecordId::new("r-1");

        assert!(!guard.is_claimed(&member, day(5), &record));
        assert!(guard.try_claim(&member, day(5), &record));
        assert!(guard.is_claimed(&member, day(5), &record));
        assert_eq!(guard.skipped(), 0);
    }
}
