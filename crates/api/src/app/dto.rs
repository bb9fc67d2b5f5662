//! Request DTOs and JSON mapping helpers.
//!
//! Responses serialize the domain types directly; list and item shapes carry
//! no transport-specific decoration.

use serde::Deserialize;

use restock_infra::NewItem;
use restock_lists::ItemStatus;

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<NewItem>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: ItemStatus,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub name: String,
    pub status: ItemStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusBatchRequest {
    pub changes: Vec<StatusChangeRequest>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemsRequest {
    pub item_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// Comma-separated status tokens, e.g. `?statuses=low,out`.
    pub statuses: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
