//! Record store abstractions.
//!
//! [`RecordStore`] is the read side the dashboard queries depend on. Revenue
//! and writes are separate traits so that a read-only source only has to
//! provide the two list operations.

use std::sync::Arc;

use thiserror::Error;

use invoicedash_core::InvoiceId;
use invoicedash_invoicing::{CustomerRecord, InvoiceChanges, InvoiceRecord, RevenueRecord};

pub mod in_memory;
pub mod placeholder;
pub mod postgres;

pub use in_memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store unreachable, or it rejected the query.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row failed validation at the store boundary.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Write conflicted with an existing record (e.g. duplicate id).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Read-only source of invoice and customer records.
///
/// No ordering is promised here; implementations document theirs.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError>;
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, StoreError>;
}

/// Source of monthly revenue figures.
#[async_trait::async_trait]
pub trait RevenueStore: Send + Sync {
    async fn list_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError>;
}

/// Invoice mutations backing the create/edit/delete actions.
#[async_trait::async_trait]
pub trait InvoiceWriter: Send + Sync {
    async fn insert_invoice(&self, invoice: InvoiceRecord) -> Result<(), StoreError>;

    /// Returns `false` if no invoice has this id.
    async fn update_invoice(&self, id: &InvoiceId, changes: &InvoiceChanges) -> Result<bool, StoreError>;

    /// Returns `false` if no invoice has this id.
    async fn delete_invoice(&self, id: &InvoiceId) -> Result<bool, StoreError>;
}

/// Everything the HTTP app needs from one backend.
pub trait InvoiceBackend: RecordStore + RevenueStore + InvoiceWriter {}

impl<T> InvoiceBackend for T where T: RecordStore + RevenueStore + InvoiceWriter + ?Sized {}

#[async_trait::async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        (**self).list_invoices().await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        (**self).list_customers().await
    }
}

#[async_trait::async_trait]
impl<S> RevenueStore for Arc<S>
where
    S: RevenueStore + ?Sized,
{
    async fn list_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError> {
        (**self).list_revenue().await
    }
}

#[async_trait::async_trait]
impl<S> InvoiceWriter for Arc<S>
where
    S: InvoiceWriter + ?Sized,
{
    async fn insert_invoice(&self, invoice: InvoiceRecord) -> Result<(), StoreError> {
        (**self).insert_invoice(invoice).await
    }

    async fn update_invoice(&self, id: &InvoiceId, changes: &InvoiceChanges) -> Result<bool, StoreError> {
        (**self).update_invoice(id, changes).await
    }

    async fn delete_invoice(&self, id: &InvoiceId) -> Result<bool, StoreError> {
        (**self).delete_invoice(id).await
    }
}
