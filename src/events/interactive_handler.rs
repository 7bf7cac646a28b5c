//! Handler for Slack interactive components delivered over Socket Mode.
//!
//! Only `block_actions` payloads are expected: the entity detail view exposes
//! a handful of demo buttons, and every click is acknowledged with a canned
//! DM to the user who pressed it.

use serde_json::Value;
use tracing::{error, info};

use super::parsing::{v_array, v_str};
use crate::slack::SlackClient;

/// Canned acknowledgement text for a known demo action.
#[must_use]
pub fn action_acknowledgement(action_id: &str) -> Option<&'static str> {
    match action_id {
        "complete_task" => Some("Task completed!"),
        "edit_task" => Some("Task editing will be implemented here"),
        "delete_task" => Some("Task deletion will be implemented here"),
        "download_file" => Some("File download will be implemented here"),
        "share_file" => Some("File sharing will be implemented here"),
        _ => None,
    }
}

/// Handle a `block_actions` payload: answer each known action with its
/// canned DM.
async fn handle_block_actions(client: &SlackClient, payload: &Value) {
    let user_id = v_str(payload, &["user", "id"]).unwrap_or("");
    let actions = v_array(payload, &["actions"]).cloned().unwrap_or_default();

    for action in &actions {
        let action_id = action
            .get("action_id")
            .and_then(|id| id.as_str())
            .unwrap_or("");

        let Some(text) = action_acknowledgement(action_id) else {
            info!(action_id, "no canned response for action");
            continue;
        };

        info!(action_id, "action triggered");

        if user_id.is_empty() {
            error!(action_id, "block_actions payload missing user id");
            continue;
        }

        if let Err(e) = client.send_dm(user_id, text).await {
            error!(action_id, error = %e, "failed to send action acknowledgement");
        }
    }
}

/// Handle an interactive payload from Slack.
///
/// # Arguments
/// - `client`: Outbound Slack client
/// - `payload`: The parsed interactive payload
pub async fn handle_interactive(client: &SlackClient, payload: &Value) {
    let payload_type = payload.get("type").and_then(|s| s.as_str()).unwrap_or("");

    match payload_type {
        "block_actions" => handle_block_actions(client, payload).await,
        other => {
            info!(payload_type = other, "unhandled interactive type");
        }
    }
}
