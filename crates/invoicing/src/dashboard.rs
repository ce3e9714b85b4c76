//! Overview cards and the "latest invoices" panel.

use serde::{Deserialize, Serialize};

use invoicedash_core::InvoiceId;

use crate::customer::CustomerRecord;
use crate::invoice::{InvoiceRecord, InvoiceStatus};
use crate::search::enrich;

/// How many invoices the latest-invoices panel shows.
pub const LATEST_INVOICES_LIMIT: usize = 5;

/// Revenue for one month of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    /// Short month label, e.g. `"Jan"`.
    pub month: String,
    pub revenue: u64,
}

/// Figures shown on the overview cards. Totals are in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: u64,
    pub total_pending_invoices: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: InvoiceId,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: u64,
}

pub fn card_data(invoices: &[InvoiceRecord], customers: &[CustomerRecord]) -> CardData {
    let mut cards = CardData {
        number_of_customers: customers.len() as u64,
        number_of_invoices: invoices.len() as u64,
        ..CardData::default()
    };
    for inv in invoices {
        match inv.status {
            InvoiceStatus::Paid => {
                cards.total_paid_invoices = cards.total_paid_invoices.saturating_add(inv.amount)
            }
            InvoiceStatus::Pending => {
                cards.total_pending_invoices = cards.total_pending_invoices.saturating_add(inv.amount)
            }
        }
    }
    cards
}

/// Most recent invoices by issue date (newest first, ties by id).
pub fn latest_invoices(invoices: &[InvoiceRecord], customers: &[CustomerRecord]) -> Vec<LatestInvoice> {
    let mut rows = enrich(invoices, customers);
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    rows.truncate(LATEST_INVOICES_LIMIT);
    rows.into_iter()
        .map(|r| LatestInvoice {
            id: r.id,
            name: r.name,
            image_url: r.image_url,
            email: r.email,
            amount: r.amount,
        })
        .collect()
}
