use axum::{Router, routing::get};

pub mod chat;
pub mod items;
pub mod lists;
pub mod system;

/// Router for all list endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/item-lists", lists::router())
        .route(
            "/users/:user_id/item-lists",
            get(lists::get_lists_by_creator),
        )
}
