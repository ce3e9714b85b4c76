use axum::Router;

pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod system;

/// Router for all dashboard endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/invoices", invoices::router())
        .nest("/customers", customers::router())
        .nest("/dashboard", dashboard::router())
}
