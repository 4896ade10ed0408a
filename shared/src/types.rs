//! Common types used across the platform

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates an opaque string identifier.
///
/// Stored ids are kept verbatim (seed products use short ids such as `p1`);
/// freshly generated ids are hyphen-less UUID v4 strings.
macro_rules! string_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a fresh random id
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(TransactionId, "Unique identifier for a ledger transaction.");
string_id!(ProductId, "Unique identifier for an inventory product.");
