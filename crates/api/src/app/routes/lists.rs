use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use restock_core::{ListId, UserId};
use restock_infra::{CreateListCommand, UpdateListCommand};

use crate::app::routes::{chat, items};
use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_list))
        .route("/:id", get(get_list).patch(update_list).delete(delete_list))
        .route("/:id/chat", post(chat::process_chat_command))
        .nest("/:id/items", items::router())
}

pub(crate) fn parse_list_id(id: &str) -> Result<ListId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid list id")
    })
}

pub async fn create_list(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateListCommand>,
) -> axum::response::Response {
    match services.lists.create_list(body).await {
        Ok(list) => {
            let location = format!("/item-lists/{}", list.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(list),
            )
                .into_response()
        }
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn get_list(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.get_list(id).await {
        Ok(Some(list)) => Json(list).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn update_list(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateListCommand>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.update_list(id, body).await {
        Ok(Some(list)) => Json(list).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn delete_list(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.delete_list(id).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn get_lists_by_creator(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id: UserId = match user_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    match services.lists.get_lists_by_creator(user_id).await {
        Ok(lists) => Json(lists).into_response(),
        Err(e) => errors::repo_error_to_response(e),
    }
}
