//! Invoicing domain module.
//!
//! Record shapes for invoices and customers plus the pure data-shaping used by
//! the dashboard: enrichment, search filtering, pagination, card totals and
//! form validation. No IO, no HTTP, no storage.

pub mod customer;
pub mod dashboard;
pub mod invoice;
pub mod pagination;
pub mod search;

pub use customer::{customer_fields, customers_table, CustomerField, CustomerRecord, CustomersTableRow};
pub use dashboard::{card_data, latest_invoices, CardData, LatestInvoice, RevenueRecord, LATEST_INVOICES_LIMIT};
pub use invoice::{
    amount_to_minor_units, InvoiceChanges, InvoiceForm, InvoiceFormInput, InvoiceRecord,
    InvoiceStatus, IssueDate,
};
pub use pagination::{into_page, page_bounds, total_pages, PAGE_SIZE};
pub use search::{enrich, search_invoices, EnrichedInvoiceRow, InvoiceSearch, UNKNOWN_CUSTOMER_NAME};
