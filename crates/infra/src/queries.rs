//! Read-side services over a [`RecordStore`].
//!
//! Every call rebuilds its working set from the store and then shapes it in
//! memory; nothing is cached between calls.

use thiserror::Error;

use invoicedash_core::{Entity, InvoiceId};
use invoicedash_invoicing::{
    card_data, customer_fields, customers_table, into_page, latest_invoices, search_invoices,
    total_pages, CardData, CustomerField, CustomerRecord, CustomersTableRow, EnrichedInvoiceRow,
    InvoiceForm, InvoiceRecord, LatestInvoice, RevenueRecord,
};

use crate::store::{RecordStore, RevenueStore, StoreError};

/// Query failure. Terminal for the call that raised it.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Backing store unreachable or query rejected.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Unexpected fault while reading or shaping records.
    #[error("query failed: {source}")]
    QueryFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => QueryError::StoreUnavailable(msg),
            other => QueryError::QueryFailed {
                source: anyhow::Error::new(other),
            },
        }
    }
}

/// Invoice, customer and dashboard queries.
#[derive(Debug, Clone)]
pub struct InvoiceQueries<S> {
    store: S,
}

impl<S> InvoiceQueries<S>
where
    S: RecordStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn snapshot(&self) -> Result<(Vec<InvoiceRecord>, Vec<CustomerRecord>), QueryError> {
        let (invoices, customers) =
            tokio::try_join!(self.store.list_invoices(), self.store.list_customers())?;
        Ok((invoices, customers))
    }

    /// All invoices joined to their customers, filtered by `query`.
    ///
    /// Rows keep the store's order.
    pub async fn filter_invoices(&self, query: &str) -> Result<Vec<EnrichedInvoiceRow>, QueryError> {
        let (invoices, customers) = self.snapshot().await?;
        let rows = search_invoices(&invoices, &customers, query);
        tracing::debug!(query, matched = rows.len(), total = invoices.len(), "filtered invoices");
        Ok(rows)
    }

    /// One page (1-based) of [`Self::filter_invoices`].
    pub async fn page(&self, query: &str, page: i64) -> Result<Vec<EnrichedInvoiceRow>, QueryError> {
        let rows = self.filter_invoices(query).await?;
        Ok(into_page(rows, page))
    }

    /// Number of pages [`Self::filter_invoices`] spans.
    pub async fn page_count(&self, query: &str) -> Result<u64, QueryError> {
        let rows = self.filter_invoices(query).await?;
        Ok(total_pages(rows.len()))
    }

    /// Invoice by id, shaped for the edit form.
    pub async fn invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceForm>, QueryError> {
        let invoices = self.store.list_invoices().await?;
        Ok(invoices.iter().find(|i| i.id() == id).map(InvoiceForm::from))
    }

    pub async fn card_data(&self) -> Result<CardData, QueryError> {
        let (invoices, customers) = self.snapshot().await?;
        Ok(card_data(&invoices, &customers))
    }

    pub async fn latest_invoices(&self) -> Result<Vec<LatestInvoice>, QueryError> {
        let (invoices, customers) = self.snapshot().await?;
        Ok(latest_invoices(&invoices, &customers))
    }

    /// Customer picker options, ordered by name.
    pub async fn customers(&self) -> Result<Vec<CustomerField>, QueryError> {
        let customers = self.store.list_customers().await?;
        Ok(customer_fields(&customers))
    }

    /// Customers table filtered on name/email, ordered by name.
    pub async fn filtered_customers(&self, query: &str) -> Result<Vec<CustomersTableRow>, QueryError> {
        let (invoices, customers) = self.snapshot().await?;
        Ok(customers_table(&customers, &invoices, query))
    }
}

impl<S> InvoiceQueries<S>
where
    S: RecordStore + RevenueStore,
{
    pub async fn revenue(&self) -> Result<Vec<RevenueRecord>, QueryError> {
        Ok(self.store.list_revenue().await?)
    }
}
