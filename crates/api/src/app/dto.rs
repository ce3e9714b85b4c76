use serde::{Deserialize, Serialize};

use invoicedash_invoicing::{EnrichedInvoiceRow, InvoiceFormInput};

// -------------------------
// Request DTOs
// -------------------------

/// `?query=&page=` on the invoices table.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListParams {
    pub query: Option<String>,
    pub page: Option<i64>,
}

/// `?query=` on search-only endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Create/edit invoice form body. `amount` is in major currency units.
#[derive(Debug, Deserialize)]
pub struct InvoiceFormRequest {
    pub customer_id: String,
    pub amount: f64,
    pub status: String,
}

impl From<InvoiceFormRequest> for InvoiceFormInput {
    fn from(value: InvoiceFormRequest) -> Self {
        InvoiceFormInput {
            customer_id: value.customer_id,
            amount: value.amount,
            status: value.status,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct InvoicePageResponse {
    pub items: Vec<EnrichedInvoiceRow>,
    pub page: i64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct PageCountResponse {
    pub total_pages: u64,
}
