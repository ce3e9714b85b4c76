use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use invoicedash_core::{CustomerId, Entity};

use crate::invoice::{InvoiceRecord, InvoiceStatus};

/// A customer as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// URI of the customer's avatar.
    pub image_url: String,
}

impl Entity for CustomerRecord {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Customer option for the invoice form's picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: CustomerId,
    pub name: String,
}

/// Row of the customers table, with per-customer invoice totals in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomersTableRow {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: u64,
    pub total_pending: u64,
    pub total_paid: u64,
}

/// All customers as picker options, ordered by name.
pub fn customer_fields(customers: &[CustomerRecord]) -> Vec<CustomerField> {
    let mut fields: Vec<CustomerField> = customers
        .iter()
        .map(|c| CustomerField {
            id: c.id.clone(),
            name: c.name.clone(),
        })
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    fields
}

/// Customers whose name or email contains `query` (case-insensitive), with
/// invoice totals, ordered by name.
pub fn customers_table(
    customers: &[CustomerRecord],
    invoices: &[InvoiceRecord],
    query: &str,
) -> Vec<CustomersTableRow> {
    #[derive(Default)]
    struct Totals {
        count: u64,
        pending: u64,
        paid: u64,
    }

    let mut totals: HashMap<&CustomerId, Totals> = HashMap::new();
    for inv in invoices {
        let t = totals.entry(&inv.customer_id).or_default();
        t.count += 1;
        match inv.status {
            InvoiceStatus::Pending => t.pending = t.pending.saturating_add(inv.amount),
            InvoiceStatus::Paid => t.paid = t.paid.saturating_add(inv.amount),
        }
    }

    let needle = query.to_lowercase();
    let mut rows: Vec<CustomersTableRow> = customers
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.email.to_lowercase().contains(&needle)
        })
        .map(|c| {
            let t = totals.get(&c.id);
            CustomersTableRow {
                id: c.id.clone(),
                name: c.name.clone(),
                email: c.email.clone(),
                image_url: c.image_url.clone(),
                total_invoices: t.map_or(0, |t| t.count),
                total_pending: t.map_or(0, |t| t.pending),
                total_paid: t.map_or(0, |t| t.paid),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::IssueDate;
    use invoicedash_core::InvoiceId;

    fn customer(id: &str, name: &str, email: &str) -> CustomerRecord {
        CustomerRecord {
            id: CustomerId::parse(id).unwrap(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: String::new(),
        }
    }

    fn invoice(id: &str, customer_id: &str, amount: u64, status: InvoiceStatus) -> InvoiceRecord {
        InvoiceRecord {
            id: InvoiceId::parse(id).unwrap(),
            customer_id: CustomerId::parse(customer_id).unwrap(),
            amount,
            status,
            date: IssueDate::parse("2024-03-01").unwrap(),
        }
    }

    #[test]
    fn customer_fields_are_sorted_by_name() {
        let customers = vec![customer("2", "Zed", "z@x"), customer("1", "Amy", "a@x")];
        let names: Vec<_> = customer_fields(&customers).into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }

    #[test]
    fn table_totals_split_by_status() {
        let customers = vec![customer("c1", "Amy", "amy@x.com"), customer("c2", "Bob", "bob@y.com")];
        let invoices = vec![
            invoice("1", "c1", 100, InvoiceStatus::Paid),
            invoice("2", "c1", 250, InvoiceStatus::Pending),
            invoice("3", "c1", 50, InvoiceStatus::Paid),
        ];

        let rows = customers_table(&customers, &invoices, "");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Amy");
        assert_eq!(rows[0].total_invoices, 3);
        assert_eq!(rows[0].total_paid, 150);
        assert_eq!(rows[0].total_pending, 250);
        assert_eq!(rows[1].total_invoices, 0);
    }

    #[test]
    fn table_filters_on_name_or_email() {
        let customers = vec![customer("c1", "Amy", "amy@x.com"), customer("c2", "Bob", "bob@y.com")];
        let ids = |q: &str| -> Vec<String> {
            customers_table(&customers, &[], q).into_iter().map(|r| r.id.to_string()).collect()
        };
        assert_eq!(ids("BOB"), ["c2"]);
        assert_eq!(ids("x.com"), ["c1"]);
        assert!(ids("nobody").is_empty());
    }
}
