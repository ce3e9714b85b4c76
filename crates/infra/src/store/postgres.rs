//! Postgres-backed record store.
//!
//! Reads the `customers`, `invoices` and `revenue` tables. Rows are validated
//! into domain records on the way out; a row that fails validation is
//! reported as [`StoreError::Malformed`] rather than silently skipped.
//!
//! ## Ordering
//!
//! - invoices: `date DESC, id ASC`
//! - customers: `name ASC, id ASC`
//! - revenue: table order of `month_index`
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database, code `23505` (unique violation) | `Conflict` |
//! | Database (other) | `Unavailable` (query rejected) |
//! | ColumnDecode / ColumnNotFound / Decode | `Malformed` |
//! | PoolClosed / PoolTimedOut / Io / Tls / other | `Unavailable` |

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::{instrument, Span};

use invoicedash_core::{CustomerId, InvoiceId};
use invoicedash_invoicing::{CustomerRecord, InvoiceChanges, InvoiceRecord, IssueDate, RevenueRecord};

use super::{InvoiceWriter, RecordStore, RevenueStore, StoreError};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        image_url TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id TEXT PRIMARY KEY,
        customer_id TEXT NOT NULL,
        amount BIGINT NOT NULL CHECK (amount >= 0),
        status TEXT NOT NULL CHECK (status IN ('pending', 'paid')),
        date DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS revenue (
        month_index INT PRIMARY KEY,
        month TEXT NOT NULL UNIQUE,
        revenue BIGINT NOT NULL
    )
    "#,
];

/// Postgres-backed store for invoices, customers and revenue.
///
/// Uses a SQLx connection pool, so it is `Send + Sync` and cheap to share.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: Arc<PgPool>,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables this store reads if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    #[instrument(skip(self), fields(row_count = tracing::field::Empty), err)]
    pub async fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id::text AS id,
                customer_id::text AS customer_id,
                amount::bigint AS amount,
                status,
                date
            FROM invoices
            ORDER BY date DESC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_invoices", e))?;

        let invoices = decode_rows::<InvoiceRow, _>(&rows)?;
        Span::current().record("row_count", invoices.len());
        Ok(invoices)
    }

    #[instrument(skip(self), err)]
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id::text AS id,
                name,
                email,
                image_url
            FROM customers
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_customers", e))?;

        decode_rows::<CustomerRow, _>(&rows)
    }

    #[instrument(skip(self), err)]
    pub async fn fetch_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError> {
        let rows = sqlx::query("SELECT month, revenue::bigint AS revenue FROM revenue ORDER BY month_index ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_revenue", e))?;

        decode_rows::<RevenueRow, _>(&rows)
    }
}

#[async_trait::async_trait]
impl RecordStore for PostgresRecordStore {
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        self.fetch_invoices().await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        self.fetch_customers().await
    }
}

#[async_trait::async_trait]
impl RevenueStore for PostgresRecordStore {
    async fn list_revenue(&self) -> Result<Vec<RevenueRecord>, StoreError> {
        self.fetch_revenue().await
    }
}

#[async_trait::async_trait]
impl InvoiceWriter for PostgresRecordStore {
    async fn insert_invoice(&self, invoice: InvoiceRecord) -> Result<(), StoreError> {
        let amount = to_db_amount(invoice.amount)?;
        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(invoice.id.as_str())
        .bind(invoice.customer_id.as_str())
        .bind(amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date.as_date())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_invoice", e))?;
        Ok(())
    }

    async fn update_invoice(&self, id: &InvoiceId, changes: &InvoiceChanges) -> Result<bool, StoreError> {
        let amount = to_db_amount(changes.amount)?;
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $2, amount = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(changes.customer_id.as_str())
        .bind(amount)
        .bind(changes.status.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_invoice", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_invoice(&self, id: &InvoiceId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_invoice", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn to_db_amount(amount: u64) -> Result<i64, StoreError> {
    i64::try_from(amount).map_err(|_| StoreError::Malformed(format!("amount {amount} exceeds BIGINT")))
}

fn decode_rows<'r, R, T>(rows: &'r [PgRow]) -> Result<Vec<T>, StoreError>
where
    R: FromRow<'r, PgRow> + TryInto<T, Error = StoreError>,
{
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let raw = R::from_row(row).map_err(|e| map_sqlx_error("decode_row", e))?;
        out.push(raw.try_into()?);
    }
    Ok(out)
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::Malformed(format!("failed to decode row in {}: {}", operation, err))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct InvoiceRow {
    id: String,
    customer_id: String,
    amount: i64,
    status: String,
    date: NaiveDate,
}

impl<'r> FromRow<'r, PgRow> for InvoiceRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InvoiceRow {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            amount: row.try_get("amount")?,
            status: row.try_get("status")?,
            date: row.try_get("date")?,
        })
    }
}

impl TryFrom<InvoiceRow> for InvoiceRecord {
    type Error = StoreError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let malformed = |e: invoicedash_core::DomainError| {
            StoreError::Malformed(format!("invoice {:?}: {}", row.id, e))
        };
        let amount = u64::try_from(row.amount)
            .map_err(|_| StoreError::Malformed(format!("invoice {:?}: negative amount {}", row.id, row.amount)))?;
        Ok(InvoiceRecord {
            id: InvoiceId::parse(row.id.as_str()).map_err(malformed)?,
            customer_id: CustomerId::parse(row.customer_id.as_str()).map_err(malformed)?,
            amount,
            status: row.status.parse().map_err(malformed)?,
            date: IssueDate::new(row.date),
        })
    }
}

#[derive(Debug)]
struct CustomerRow {
    id: String,
    name: String,
    email: String,
    image_url: String,
}

impl<'r> FromRow<'r, PgRow> for CustomerRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CustomerRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            image_url: row.try_get("image_url")?,
        })
    }
}

impl TryFrom<CustomerRow> for CustomerRecord {
    type Error = StoreError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let id = CustomerId::parse(row.id)
            .map_err(|e| StoreError::Malformed(format!("customer: {e}")))?;
        Ok(CustomerRecord {
            id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
        })
    }
}

#[derive(Debug)]
struct RevenueRow {
    month: String,
    revenue: i64,
}

impl<'r> FromRow<'r, PgRow> for RevenueRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(RevenueRow {
            month: row.try_get("month")?,
            revenue: row.try_get("revenue")?,
        })
    }
}

impl TryFrom<RevenueRow> for RevenueRecord {
    type Error = StoreError;

    fn try_from(row: RevenueRow) -> Result<Self, Self::Error> {
        let revenue = u64::try_from(row.revenue).map_err(|_| {
            StoreError::Malformed(format!("revenue for {:?} is negative: {}", row.month, row.revenue))
        })?;
        Ok(RevenueRecord {
            month: row.month,
            revenue,
        })
    }
}
