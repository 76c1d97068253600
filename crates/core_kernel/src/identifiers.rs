//! Identifiers for ledger-backed entities
//!
//! Ledger keys are opaque strings supplied by the caller (for example `"1005"`),
//! so identifiers wrap a `String` rather than a UUID. Generated identifiers use
//! time-ordered UUIDs with a type prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_key {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing key without validation
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Generates a fresh time-ordered key
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7()))
            }

            /// Returns the key as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the key is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Returns the prefix used for generated keys
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(CoreError::validation(concat!(
                        stringify!($name),
                        " must not be empty"
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Claims domain identifiers
define_key!(ClaimId, "CLM");
