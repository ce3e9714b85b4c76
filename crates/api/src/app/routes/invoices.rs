use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use invoicedash_core::InvoiceId;
use invoicedash_invoicing::{into_page, total_pages, IssueDate};

use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/pages", get(invoice_pages))
        .route("/:id", get(get_invoice).put(update_invoice).delete(delete_invoice))
}

fn parse_invoice_id(id: String) -> Result<InvoiceId, axum::response::Response> {
    InvoiceId::parse(id)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(params): ApiQuery<dto::InvoiceListParams>,
) -> axum::response::Response {
    let query = params.query.unwrap_or_default();
    let page = params.page.unwrap_or(1);

    // items and total_pages come from one snapshot
    let rows = match services.queries().filter_invoices(&query).await {
        Ok(rows) => rows,
        Err(e) => return errors::query_error_to_response(e),
    };
    let total_pages = total_pages(rows.len());

    (
        StatusCode::OK,
        Json(dto::InvoicePageResponse {
            items: into_page(rows, page),
            page,
            total_pages,
        }),
    )
        .into_response()
}

pub async fn invoice_pages(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(params): ApiQuery<dto::SearchParams>,
) -> axum::response::Response {
    let query = params.query.unwrap_or_default();
    match services.queries().page_count(&query).await {
        Ok(total_pages) => (StatusCode::OK, Json(dto::PageCountResponse { total_pages })).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_invoice_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.queries().invoice_by_id(&id).await {
        Ok(Some(form)) => (StatusCode::OK, Json(form)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::InvoiceFormRequest>,
) -> axum::response::Response {
    let issued_on = IssueDate::new(Utc::now().date_naive());
    match services.commands().create_invoice(&body.into(), issued_on).await {
        Ok(id) => (StatusCode::CREATED, Json(serde_json::json!({ "id": id }))).into_response(),
        Err(e) => errors::command_error_to_response(e),
    }
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::InvoiceFormRequest>,
) -> axum::response::Response {
    let id = match parse_invoice_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.commands().update_invoice(&id, &body.into()).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "id": id }))).into_response(),
        Err(e) => errors::command_error_to_response(e),
    }
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_invoice_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.commands().delete_invoice(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::command_error_to_response(e),
    }
}
