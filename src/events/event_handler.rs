//! Handler for Slack Events API callbacks delivered over Socket Mode.
//!
//! This module processes `event_callback` payloads including:
//! - `link_shared` - A recognized URL was posted; reply with unfurl metadata
//! - `entity_details_requested` - A user opened an unfurled entity; present
//!   the detail view

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use super::parsing::v_str;
use crate::slack::SlackClient;
use crate::slack::entities;
use crate::utils::links::{SharedLink, classify_link};

// ============================================================================
// Entity Builders
// ============================================================================

/// Build unfurl entities for every recognized link in a `link_shared` event.
///
/// Unrecognized links contribute nothing; the caller skips the API call when
/// the result is empty.
#[must_use]
pub fn entities_for_links(event: &Value) -> Vec<Value> {
    let sharing_user = event.get("user").and_then(Value::as_str);

    let Some(links) = event.get("links").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for link in links {
        let Some(url) = link.get("url").and_then(Value::as_str) else {
            continue;
        };

        match classify_link(url) {
            Some(SharedLink::Task { url, id }) => {
                debug!(task_id = %id, "task entity added");
                out.push(entities::task_unfurl_entity(&url, &id));
            }
            Some(SharedLink::Document { url, id }) => {
                debug!(file_id = %id, "document entity added");
                out.push(entities::document_unfurl_entity(&url, &id, sharing_user));
            }
            None => {
                debug!(url, "link does not match a known entity URL");
            }
        }
    }
    out
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Handle a `link_shared` event: unfurl every recognized link.
async fn handle_link_shared(client: &SlackClient, event: &Value) {
    let entities = entities_for_links(event);
    if entities.is_empty() {
        return;
    }

    let channel = v_str(event, &["channel"]).unwrap_or("");
    let message_ts = v_str(event, &["message_ts"]).unwrap_or("");
    if channel.is_empty() || message_ts.is_empty() {
        error!("link_shared event missing channel or message_ts");
        return;
    }

    let count = entities.len();
    let metadata = json!({ "entities": entities });

    match client.chat_unfurl(channel, message_ts, &metadata).await {
        Ok(()) => info!(entities = count, channel, "unfurl sent"),
        Err(e) => error!(error = %e, "failed to send unfurl for link_shared event"),
    }
}

/// Handle an `entity_details_requested` event: present the detail view for
/// the entity the user opened.
async fn handle_entity_details_requested(client: &SlackClient, event: &Value) {
    let external_ref = event.get("external_ref").cloned().unwrap_or_else(|| json!({}));
    let entity_id = external_ref
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("");
    let entity_url = v_str(event, &["entity_url"])
        .or_else(|| v_str(event, &["app_unfurl_url"]))
        .unwrap_or("");
    let trigger_id = v_str(event, &["trigger_id"]).unwrap_or("");
    let user_id = v_str(event, &["user_id"]);

    let Some(link) = classify_link(entity_url) else {
        error!(url = entity_url, "unknown entity type for requested details");
        return;
    };

    let now = Utc::now();
    let entity_payload = match &link {
        SharedLink::Task { .. } => entities::task_detail_payload(entity_id, user_id, now),
        SharedLink::Document { .. } => entities::document_detail_payload(entity_id, user_id, now),
    };

    let metadata = json!({
        "entity_type": link.entity_type(),
        "entity_payload": entity_payload,
        "url": entity_url,
        "external_ref": external_ref,
    });

    match client.entity_present_details(trigger_id, &metadata).await {
        Ok(()) => info!(entity_id, "entity details presented"),
        Err(e) => error!(error = %e, "failed to present entity details"),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Handle an `event_callback` payload from Slack.
///
/// # Arguments
/// - `client`: Outbound Slack client
/// - `json_body`: The full JSON body of the event callback
pub async fn handle_event_callback(client: &SlackClient, json_body: &Value) {
    let Some(event) = json_body.get("event") else {
        debug!("event callback without event body");
        return;
    };

    let event_type = event.get("type").and_then(|t| t.as_str()).unwrap_or("");
    // Catch-all visibility into everything the app is subscribed to.
    info!(event_type = %event_type, "event received");

    match event_type {
        "link_shared" => handle_link_shared(client, event).await,
        "entity_details_requested" => handle_entity_details_requested(client, event).await,
        "message" => {
            debug!(
                channel = v_str(event, &["channel"]).unwrap_or(""),
                "message event received"
            );
        }
        _ => {
            // No-op for other events
        }
    }
}
