//! Infrastructure layer: record stores, query/command services, configuration.

pub mod commands;
pub mod config;
pub mod queries;
pub mod store;

pub use commands::{CommandError, InvoiceCommands};
pub use config::{AppConfig, ConfigError, StoreBackend};
pub use queries::{InvoiceQueries, QueryError};
pub use store::{
    InMemoryRecordStore, InvoiceBackend, InvoiceWriter, PostgresRecordStore, RecordStore,
    RevenueStore, StoreError,
};
