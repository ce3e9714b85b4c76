use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use invoicedash_infra::{CommandError, QueryError, StoreError};

pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    tracing::warn!(error = %err, "query failed");
    match err {
        QueryError::StoreUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        QueryError::QueryFailed { .. } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "query_failed",
            "failed to read records",
        ),
    }
}

pub fn command_error_to_response(err: CommandError) -> axum::response::Response {
    tracing::warn!(error = %err, "command failed");
    match err {
        CommandError::Invalid(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        CommandError::UnknownCustomer(id) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "unknown_customer",
            format!("customer {id} does not exist"),
        ),
        CommandError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("invoice {id} not found"))
        }
        CommandError::Store(StoreError::Conflict(msg)) => json_error(StatusCode::CONFLICT, "conflict", msg),
        CommandError::Store(StoreError::Unavailable(msg)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        CommandError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

/// Malformed query string or request body.
pub fn rejection_to_response(code: &'static str, detail: String) -> axum::response::Response {
    tracing::debug!(code, %detail, "request rejected");
    json_error(StatusCode::BAD_REQUEST, code, detail)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
