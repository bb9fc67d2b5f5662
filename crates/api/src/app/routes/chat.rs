use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    response::IntoResponse,
};

use crate::app::routes::lists::parse_list_id;
use crate::app::{chat, dto, errors, services::AppServices};

pub async fn process_chat_command(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ChatRequest>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match chat::dispatch(&services, id, &body.message).await {
        Ok(reply) => Json(serde_json::json!({ "reply": reply })).into_response(),
        Err(e) => errors::chat_error_to_response(e),
    }
}
