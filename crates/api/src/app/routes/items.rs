use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use restock_lists::ItemStatusChange;

use crate::app::routes::lists::parse_list_id;
use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(get_items)
                .post(add_items)
                .patch(update_item_statuses)
                .delete(delete_items),
        )
        .route(
            "/:name",
            get(get_item).patch(update_item_status).delete(delete_item),
        )
}

pub async fn get_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<dto::ItemsQuery>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // ?statuses=low,out narrows the listing; no query (or an empty one)
    // returns everything.
    let statuses = match query.statuses.as_deref() {
        Some(raw) => match errors::parse_statuses(raw) {
            Ok(v) => v,
            Err(resp) => return resp,
        },
        None => Vec::new(),
    };

    let result = if statuses.is_empty() {
        services.lists.get_items(id).await
    } else {
        services.lists.get_items_by_status(id, statuses).await
    };

    match result {
        Ok(Some(items)) => Json(items).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn add_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddItemsRequest>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if body.items.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "no items provided to add to the list",
        );
    }

    match services.lists.add_items(id, body.items).await {
        Ok(added) => (StatusCode::CREATED, Json(added)).into_response(),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, name)): Path<(String, String)>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.get_items(id).await {
        Ok(Some(items)) => match items.into_iter().find(|item| item.name == name) {
            Some(item) => Json(item).into_response(),
            None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        },
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn update_item_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, name)): Path<(String, String)>,
    Json(body): Json<dto::UpdateItemStatusRequest>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.update_item_status(id, &name, body.status).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn update_item_statuses(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemStatusBatchRequest>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let changes: Result<Vec<ItemStatusChange>, _> = body
        .changes
        .into_iter()
        .map(|change| ItemStatusChange::new(change.name, change.status))
        .collect();
    let changes = match changes {
        Ok(v) => v,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string());
        }
    };

    match services.lists.update_item_statuses(id, changes).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, name)): Path<(String, String)>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.delete_item(id, &name).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}

pub async fn delete_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::DeleteItemsRequest>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.delete_items(id, body.item_names).await {
        Ok(Some(removed)) => Json(removed).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "list not found"),
        Err(e) => errors::repo_error_to_response(e),
    }
}
