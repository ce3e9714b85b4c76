use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/cards", get(cards))
        .route("/latest-invoices", get(latest_invoices))
        .route("/revenue", get(revenue))
}

pub async fn cards(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.queries().card_data().await {
        Ok(cards) => (StatusCode::OK, Json(cards)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn latest_invoices(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.queries().latest_invoices().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn revenue(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.queries().revenue().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
