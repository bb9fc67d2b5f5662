//! Chat command dispatch.
//!
//! Maps a parsed chat command onto list service calls and renders a
//! human-readable confirmation string. Failures here are terminal for the
//! request; nothing is retried.

use restock_chat::CommandAction;
use restock_core::ListId;
use restock_infra::{NewItem, RepositoryError};
use restock_lists::Item;
use thiserror::Error;

use crate::app::services::AppServices;

/// A structurally valid parse that is semantically incomplete for its action,
/// or no parse at all.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no command recognized")]
    NoCommand,

    #[error("no items provided to {0}")]
    MissingItems(&'static str),

    #[error("no status provided for update")]
    MissingStatus,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Interpret one line of chat input against a list and describe the outcome.
pub async fn dispatch(
    services: &AppServices,
    list_id: ListId,
    input: &str,
) -> Result<String, ChatError> {
    let Some(command) = services.parser.parse(input) else {
        return Err(ChatError::NoCommand);
    };
    tracing::debug!(?command, %list_id, "dispatching chat command");

    let lists = &services.lists;
    match command.action {
        CommandAction::Add => {
            if command.items.is_empty() {
                return Err(ChatError::MissingItems("add"));
            }
            // Status is stamped at creation (defaults to Unknown); the parsed
            // command's implied status is not applied to new items.
            let items = command
                .items
                .into_iter()
                .map(|name| NewItem { name, status: None })
                .collect();
            let added = lists.add_items(list_id, items).await?;
            Ok(format!("Added items: {}", join_names(&added)))
        }

        CommandAction::Remove => {
            if command.items.is_empty() {
                return Err(ChatError::MissingItems("remove"));
            }
            let removed = lists.delete_items(list_id, command.items).await?;
            match removed {
                Some(removed) if !removed.is_empty() => {
                    Ok(format!("Removed items: {}", join_names(&removed)))
                }
                _ => Ok("No items removed, list not found or no items matched".to_string()),
            }
        }

        CommandAction::Update => {
            if command.items.is_empty() {
                return Err(ChatError::MissingItems("update"));
            }
            let status = command.status.ok_or(ChatError::MissingStatus)?;

            // Sequential single-item updates, mirroring how a user would issue
            // them; the all-or-nothing batch path is the structured API's.
            let mut updated = Vec::with_capacity(command.items.len());
            for name in &command.items {
                updated.push(lists.update_item_status(list_id, name, status).await?);
            }
            Ok(format!("Updated items: {}", join_names(&updated)))
        }

        CommandAction::List => {
            let items = lists
                .get_items(list_id)
                .await?
                .ok_or_else(RepositoryError::not_found)?;
            Ok(format!("All items: {}", join_names(&items)))
        }

        CommandAction::Filter => {
            let status = command.status.ok_or(ChatError::MissingStatus)?;
            let items = lists
                .get_items_by_status(list_id, vec![status])
                .await?
                .ok_or_else(RepositoryError::not_found)?;
            Ok(format!(
                "{} items: {}",
                status.display_name(),
                join_names(&items)
            ))
        }
    }
}

fn join_names(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
