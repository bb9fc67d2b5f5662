//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use restock_core::DomainError;
use restock_infra::RepositoryError;
use restock_lists::ItemStatus;

use crate::app::chat::ChatError;

pub fn repo_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "not found")
        }
        RepositoryError::Domain(e @ DomainError::DuplicateName(_)) => {
            json_error(StatusCode::BAD_REQUEST, "duplicate_name", e.to_string())
        }
        RepositoryError::Domain(e) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
        RepositoryError::Document(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "document_error",
            e.to_string(),
        ),
        RepositoryError::Database(e) => {
            tracing::error!("database error: {e}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "storage failure",
            )
        }
    }
}

pub fn chat_error_to_response(err: ChatError) -> axum::response::Response {
    match err {
        ChatError::Repository(e) => repo_error_to_response(e),
        ChatError::NoCommand => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "no_command", err.to_string())
        }
        ChatError::MissingItems(_) | ChatError::MissingStatus => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "incomplete_command",
            err.to_string(),
        ),
    }
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

/// Parse a comma-separated status filter (`low,out`), order-insensitive.
pub fn parse_statuses(s: &str) -> Result<Vec<ItemStatus>, axum::response::Response> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            ItemStatus::parse(token).map_err(|e| {
                json_error(StatusCode::BAD_REQUEST, "invalid_status", e.to_string())
            })
        })
        .collect()
}
