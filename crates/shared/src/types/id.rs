//! Typed IDs for type-safe entity references.
//!
//! The backend issues opaque string identifiers for every entity. Wrapping
//! them prevents accidentally passing a `RecordId` where a `SaleId` is
//! expected, which matters a great deal in the attribution code paths.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers over the backend's opaque strings.
macro_rules! opaque_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from a backend-issued identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

opaque_id!(MemberId, "Unique identifier for a member.");
opaque_id!(RecordId, "Unique identifier for a transaction record.");
opaque_id!(SaleId, "Unique identifier for a sale transaction (one checkout).");
opaque_id!(
    DistributionId,
    "Opaque identifier linking a payment record to a product-sale disbursement."
);
opaque_id!(ProductId, "Unique identifier for a product entry.");
opaque_id!(CollectorId, "Unique identifier for a field collector.");
opaque_id!(BranchId, "Unique identifier for a branch office.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_construction() {
        let id = MemberId::new("m-1001");
        assert_eq!(id.as_str(), "m-1001");
        assert_eq!(id.to_string(), "m-1001");
        assert_eq!(id.into_inner(), "m-1001");
    }

    #[test]
    fn test_id_from_str_and_string() {
        assert_eq!(SaleId::from("s-1"), SaleId::new("s-1"));
        assert_eq!(SaleId::from(String::from("s-1")), SaleId::new("s-1"));
    }

    #[test]
    fn test_id_hash_and_eq() {
        let mut set = HashSet::new();
        assert!(set.insert(RecordId::new("r-1")));
        assert!(!set.insert(RecordId::new("r-1")));
        assert!(set.insert(RecordId::new("r-2")));
    }
}
