use std::sync::Arc;

use invoicedash_core::{IdGenerator, UuidIdGenerator};
use invoicedash_infra::{
    AppConfig, InMemoryRecordStore, InvoiceBackend, InvoiceCommands, InvoiceQueries,
    PostgresRecordStore, StoreBackend,
};

/// Type-erased store shared by the query and command sides.
pub type Backend = Arc<dyn InvoiceBackend>;

/// Services handed to every handler.
pub struct AppServices {
    queries: InvoiceQueries<Backend>,
    commands: InvoiceCommands<Backend, Arc<dyn IdGenerator>>,
}

impl AppServices {
    pub fn new(backend: Backend, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            queries: InvoiceQueries::new(backend.clone()),
            commands: InvoiceCommands::new(backend, ids),
        }
    }

    /// Seeded in-memory backend with UUID ids (dev/test).
    pub fn in_memory() -> anyhow::Result<Self> {
        let store = InMemoryRecordStore::with_placeholder_data()?;
        Ok(Self::new(Arc::new(store), Arc::new(UuidIdGenerator)))
    }

    pub fn queries(&self) -> &InvoiceQueries<Backend> {
        &self.queries
    }

    pub fn commands(&self) -> &InvoiceCommands<Backend, Arc<dyn IdGenerator>> {
        &self.commands
    }
}

/// Pick and connect the backend named by the config.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match &config.store {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory record store with placeholder data");
            AppServices::in_memory()
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PostgresRecordStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres record store");
            Ok(AppServices::new(Arc::new(store), Arc::new(UuidIdGenerator)))
        }
    }
}
