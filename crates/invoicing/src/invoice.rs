use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicedash_core::{CustomerId, DomainError, DomainResult, Entity, InvoiceId};

/// Invoice status. Exactly two values exist for filtering and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(DomainError::validation(format!(
                "status must be one of: pending, paid (got {other:?})"
            ))),
        }
    }
}

/// Calendar date an invoice was issued on. Rendered as ISO-8601 (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueDate(NaiveDate);

impl IssueDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| DomainError::validation(format!("issue date must be YYYY-MM-DD: {e}")))
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl core::fmt::Display for IssueDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for IssueDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// An invoice as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount: u64,
    pub status: InvoiceStatus,
    pub date: IssueDate,
}

impl Entity for InvoiceRecord {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Invoice shape used to pre-fill the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    /// Minor units; the form renders major units.
    pub amount: u64,
    pub status: InvoiceStatus,
}

impl From<&InvoiceRecord> for InvoiceForm {
    fn from(value: &InvoiceRecord) -> Self {
        Self {
            id: value.id.clone(),
            customer_id: value.customer_id.clone(),
            amount: value.amount,
            status: value.status,
        }
    }
}

/// Raw create/edit form submission, amount in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFormInput {
    pub customer_id: String,
    pub amount: f64,
    pub status: String,
}

/// Validated field changes derived from an [`InvoiceFormInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: CustomerId,
    pub amount: u64,
    pub status: InvoiceStatus,
}

impl InvoiceFormInput {
    /// Validate the submission and convert the amount to minor units.
    pub fn validate(&self) -> DomainResult<InvoiceChanges> {
        let customer_id = CustomerId::parse(self.customer_id.trim())
            .map_err(|_| DomainError::validation("customer_id is required"))?;
        let amount = amount_to_minor_units(self.amount)?;
        let status = self.status.parse()?;
        Ok(InvoiceChanges {
            customer_id,
            amount,
            status,
        })
    }
}

impl InvoiceChanges {
    /// Materialize a new record from validated changes.
    pub fn into_record(self, id: InvoiceId, date: IssueDate) -> InvoiceRecord {
        InvoiceRecord {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }

    pub fn apply_to(&self, record: &mut InvoiceRecord) {
        record.customer_id = self.customer_id.clone();
        record.amount = self.amount;
        record.status = self.status;
    }
}

/// Convert a major-unit amount (e.g. dollars) to minor units, rounding to the
/// nearest cent.
pub fn amount_to_minor_units(amount: f64) -> DomainResult<u64> {
    if !amount.is_finite() {
        return Err(DomainError::validation("amount must be a finite number"));
    }
    if amount < 0.0 {
        return Err(DomainError::validation("amount must not be negative"));
    }
    let cents = (amount * 100.0).round();
    if cents >= u64::MAX as f64 {
        return Err(DomainError::validation("amount is too large"));
    }
    Ok(cents as u64)
}
