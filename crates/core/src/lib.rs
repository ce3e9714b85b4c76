//! `invoicedash-core`: shared ids, errors and the entity trait.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, IdGenerator, InvoiceId, UuidIdGenerator};
