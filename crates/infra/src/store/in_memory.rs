use std::sync::RwLock;

use invoicedash_core::{DomainError, Entity, InvoiceId};
use invoicedash_invoicing::{CustomerRecord, InvoiceChanges, InvoiceRecord, RevenueRecord};

use super::{placeholder, InvoiceWriter, RecordStore, RevenueStore, StoreError};

/// In-memory record store for demos/tests.
///
/// Lists come back in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    invoices: RwLock<Vec<InvoiceRecord>>,
    customers: RwLock<Vec<CustomerRecord>>,
    revenue: RwLock<Vec<RevenueRecord>>,
}

impl InMemoryRecordStore {
    pub fn new(
        invoices: Vec<InvoiceRecord>,
        customers: Vec<CustomerRecord>,
        revenue: Vec<RevenueRecord>,
    ) -> Self {
        Self {
            invoices: RwLock::new(invoices),
            customers: RwLock::new(customers),
            revenue: RwLock::new(revenue),
        }
    }

    /// Store seeded with the bundled demo dataset.
    pub fn with_placeholder_data() -> Result<Self, DomainError> {
        Ok(Self::new(
            placeholder::invoices()?,
            placeholder::customers()?,
            placeholder::revenue(),
        ))
    }
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Unavailable(format!("{what} lock poisoned"))
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        let invoices = self.invoices.read().map_err(|_| poisoned("invoices"))?;
        Ok(invoices.clone())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned("customers"))?;
        Ok(customers.clone())
    }
}

#[async_trait::async_trait]
impl RevenueStore for InMemoryRecordStore {
    async fn list_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError> {
        let revenue = self.revenue.read().map_err(|_| poisoned("revenue"))?;
        Ok(revenue.clone())
    }
}

#[async_trait::async_trait]
impl InvoiceWriter for InMemoryRecordStore {
    async fn insert_invoice(&self, invoice: InvoiceRecord) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(|_| poisoned("invoices"))?;
        if invoices.iter().any(|i| i.id() == invoice.id()) {
            return Err(StoreError::Conflict(format!("invoice {} already exists", invoice.id)));
        }
        invoices.push(invoice);
        Ok(())
    }

    async fn update_invoice(&self, id: &InvoiceId, changes: &InvoiceChanges) -> Result<bool, StoreError> {
        let mut invoices = self.invoices.write().map_err(|_| poisoned("invoices"))?;
        match invoices.iter_mut().find(|i| i.id() == id) {
            Some(record) => {
                changes.apply_to(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_invoice(&self, id: &InvoiceId) -> Result<bool, StoreError> {
        let mut invoices = self.invoices.write().map_err(|_| poisoned("invoices"))?;
        let before = invoices.len();
        invoices.retain(|i| i.id() != id);
        Ok(invoices.len() != before)
    }
}
