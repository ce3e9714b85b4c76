//! Strongly-typed identifiers and the identifier-generation capability.
//!
//! Invoice and customer ids are opaque strings: rows created by the seed data
//! and by older tooling are not guaranteed to be UUIDs, so the newtypes only
//! require a non-blank value.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an invoice record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceId(String);

/// Identifier of a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Build an identifier, rejecting blank values.
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, " must not be empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_id!(InvoiceId, "InvoiceId");
impl_string_id!(CustomerId, "CustomerId");

/// Source of fresh invoice identifiers.
///
/// Injected into the command side so tests can pin ids.
pub trait IdGenerator: Send + Sync {
    fn next_invoice_id(&self) -> InvoiceId;
}

/// Default generator: UUIDv7 (time-ordered) rendered as a string.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_invoice_id(&self) -> InvoiceId {
        InvoiceId(Uuid::now_v7().to_string())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
    fn next_invoice_id(&self) -> InvoiceId {
        (**self).next_invoice_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(InvoiceId::parse("").is_err());
        assert!(CustomerId::parse("   ").is_err());
        assert_eq!(CustomerId::parse("c1").unwrap().as_str(), "c1");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = InvoiceId::parse("inv-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"inv-1\"");

        let back: InvoiceId = serde_json::from_str("\"inv-1\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<InvoiceId>("\"\"").is_err());
    }

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let g = UuidIdGenerator;
        let a = g.next_invoice_id();
        let b = g.next_invoice_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }
}
