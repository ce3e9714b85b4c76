//! Invoice create/edit/delete actions.

use thiserror::Error;
use tracing::instrument;

use invoicedash_core::{CustomerId, DomainError, Entity, IdGenerator, InvoiceId};
use invoicedash_invoicing::{InvoiceChanges, InvoiceFormInput, IssueDate};

use crate::store::{InvoiceWriter, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("unknown customer: {0}")]
    UnknownCustomer(CustomerId),

    #[error("invoice not found: {0}")]
    NotFound(InvoiceId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies invoice form submissions to a writable store.
#[derive(Debug, Clone)]
pub struct InvoiceCommands<S, G> {
    store: S,
    ids: G,
}

impl<S, G> InvoiceCommands<S, G>
where
    S: RecordStore + InvoiceWriter,
    G: IdGenerator,
{
    pub fn new(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    async fn validate(&self, input: &InvoiceFormInput) -> Result<InvoiceChanges, CommandError> {
        let changes = input.validate()?;
        let customers = self.store.list_customers().await?;
        if !customers.iter().any(|c| c.id() == &changes.customer_id) {
            return Err(CommandError::UnknownCustomer(changes.customer_id));
        }
        Ok(changes)
    }

    /// Create an invoice issued on `issued_on`; returns the new id.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id), err)]
    pub async fn create_invoice(
        &self,
        input: &InvoiceFormInput,
        issued_on: IssueDate,
    ) -> Result<InvoiceId, CommandError> {
        let changes = self.validate(input).await?;
        let id = self.ids.next_invoice_id();
        self.store
            .insert_invoice(changes.into_record(id.clone(), issued_on))
            .await?;
        tracing::info!(invoice_id = %id, "invoice created");
        Ok(id)
    }

    /// Replace customer, amount and status. The issue date is kept.
    #[instrument(skip(self, input), fields(invoice_id = %id), err)]
    pub async fn update_invoice(&self, id: &InvoiceId, input: &InvoiceFormInput) -> Result<(), CommandError> {
        let changes = self.validate(input).await?;
        if !self.store.update_invoice(id, &changes).await? {
            return Err(CommandError::NotFound(id.clone()));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    pub async fn delete_invoice(&self, id: &InvoiceId) -> Result<(), CommandError> {
        if !self.store.delete_invoice(id).await? {
            return Err(CommandError::NotFound(id.clone()));
        }
        Ok(())
    }
}
