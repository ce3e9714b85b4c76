use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::extract::ApiQuery;
use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers))
        .route("/table", get(customers_table))
}

pub async fn list_customers(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.queries().customers().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn customers_table(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(params): ApiQuery<dto::SearchParams>,
) -> axum::response::Response {
    let query = params.query.unwrap_or_default();
    match services.queries().filtered_customers(&query).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
