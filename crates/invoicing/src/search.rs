//! Invoice enrichment and free-text search.
//!
//! Enrichment joins each invoice to its customer's display fields; search
//! keeps the rows whose derived fields contain the query, case-insensitively.
//! Neither step reorders rows: output follows the order of the input invoices.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use invoicedash_core::{CustomerId, InvoiceId};

use crate::customer::CustomerRecord;
use crate::invoice::{InvoiceRecord, InvoiceStatus, IssueDate};

/// Name shown for an invoice whose customer reference does not resolve.
pub const UNKNOWN_CUSTOMER_NAME: &str = "Unknown";

/// Invoice row with the customer's display fields denormalized onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedInvoiceRow {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Amount in smallest currency unit.
    pub amount: u64,
    pub status: InvoiceStatus,
    pub date: IssueDate,
}

impl EnrichedInvoiceRow {
    fn new(invoice: &InvoiceRecord, customer: Option<&CustomerRecord>) -> Self {
        let (name, email, image_url) = match customer {
            Some(c) => (c.name.clone(), c.email.clone(), c.image_url.clone()),
            None => (UNKNOWN_CUSTOMER_NAME.to_string(), String::new(), String::new()),
        };
        Self {
            id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            name,
            email,
            image_url,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        }
    }
}

/// Resolve every invoice's customer. Unresolved references get defaults.
///
/// If the customer list contains duplicate ids the first one wins.
pub fn enrich(invoices: &[InvoiceRecord], customers: &[CustomerRecord]) -> Vec<EnrichedInvoiceRow> {
    let mut by_id: HashMap<&CustomerId, &CustomerRecord> = HashMap::with_capacity(customers.len());
    for c in customers {
        by_id.entry(&c.id).or_insert(c);
    }

    invoices
        .iter()
        .map(|inv| EnrichedInvoiceRow::new(inv, by_id.get(&inv.customer_id).copied()))
        .collect()
}

/// Case-insensitive substring match over an enriched row's searchable fields:
/// customer name, email, amount (decimal minor units), ISO date and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSearch {
    needle: String,
}

impl InvoiceSearch {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty search matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, row: &EnrichedInvoiceRow) -> bool {
        if self.is_empty() {
            return true;
        }
        let needle = self.needle.as_str();
        row.name.to_lowercase().contains(needle)
            || row.email.to_lowercase().contains(needle)
            || row.amount.to_string().contains(needle)
            || row.date.to_string().contains(needle)
            || row.status.as_str().contains(needle)
    }

    pub fn filter(&self, rows: Vec<EnrichedInvoiceRow>) -> Vec<EnrichedInvoiceRow> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Enrich then filter in one pass.
pub fn search_invoices(
    invoices: &[InvoiceRecord],
    customers: &[CustomerRecord],
    query: &str,
) -> Vec<EnrichedInvoiceRow> {
    InvoiceSearch::new(query).filter(enrich(invoices, customers))
}
