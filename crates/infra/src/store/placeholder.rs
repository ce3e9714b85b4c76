//! Seed data for the in-memory store (demo mode).

use invoicedash_core::{CustomerId, DomainResult, InvoiceId};
use invoicedash_invoicing::{CustomerRecord, InvoiceRecord, InvoiceStatus, IssueDate, RevenueRecord};

const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", "Maren Holt", "maren@holt.dev", "/customers/maren-holt.png"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442a", "Tobias Reyes", "tobias@reyes.io", "/customers/tobias-reyes.png"),
    ("3958dc9e-737f-4377-85e9-fec4b6a6442a", "Ingrid Nakamura", "ingrid@nakamura.co", "/customers/ingrid-nakamura.png"),
    ("50ca3e18-62cd-11ee-8c99-0242ac120002", "Oskar Lindqvist", "oskar@lindqvist.se", "/customers/oskar-lindqvist.png"),
    ("3958dc9e-787f-4377-85e9-fec4b6a6442a", "Priya Venkat", "priya@venkat.in", "/customers/priya-venkat.png"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f2", "Lucas Ferreira", "lucas@ferreira.br", "/customers/lucas-ferreira.png"),
];

const INVOICES: &[(&str, usize, u64, InvoiceStatus, &str)] = &[
    ("inv-0001", 0, 15795, InvoiceStatus::Pending, "2022-12-06"),
    ("inv-0002", 1, 20348, InvoiceStatus::Pending, "2022-11-14"),
    ("inv-0003", 4, 3040, InvoiceStatus::Paid, "2022-10-29"),
    ("inv-0004", 3, 44800, InvoiceStatus::Paid, "2023-09-10"),
    ("inv-0005", 5, 34577, InvoiceStatus::Pending, "2023-08-05"),
    ("inv-0006", 2, 54246, InvoiceStatus::Pending, "2023-07-16"),
    ("inv-0007", 0, 666, InvoiceStatus::Pending, "2023-06-27"),
    ("inv-0008", 3, 32545, InvoiceStatus::Paid, "2023-06-09"),
    ("inv-0009", 4, 1250, InvoiceStatus::Paid, "2023-06-17"),
    ("inv-0010", 5, 8546, InvoiceStatus::Paid, "2023-06-07"),
    ("inv-0011", 1, 500, InvoiceStatus::Paid, "2023-08-19"),
    ("inv-0012", 5, 8945, InvoiceStatus::Paid, "2023-06-03"),
    ("inv-0013", 2, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

const REVENUE: &[(&str, u64)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

pub fn customers() -> DomainResult<Vec<CustomerRecord>> {
    CUSTOMERS
        .iter()
        .map(|(id, name, email, image_url)| {
            Ok(CustomerRecord {
                id: CustomerId::parse(*id)?,
                name: (*name).to_string(),
                email: (*email).to_string(),
                image_url: (*image_url).to_string(),
            })
        })
        .collect()
}

pub fn invoices() -> DomainResult<Vec<InvoiceRecord>> {
    INVOICES
        .iter()
        .map(|(id, customer_idx, amount, status, date)| {
            Ok(InvoiceRecord {
                id: InvoiceId::parse(*id)?,
                customer_id: CustomerId::parse(CUSTOMERS[*customer_idx].0)?,
                amount: *amount,
                status: *status,
                date: IssueDate::parse(date)?,
            })
        })
        .collect()
}

pub fn revenue() -> Vec<RevenueRecord> {
    REVENUE
        .iter()
        .map(|(month, revenue)| RevenueRecord {
            month: (*month).to_string(),
            revenue: *revenue,
        })
        .collect()
}
