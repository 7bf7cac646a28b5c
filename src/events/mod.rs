//! Socket Mode envelope routing.
//!
//! The transport acknowledges every envelope before it lands here, so a
//! failing handler never blocks delivery; handlers log their own failures
//! and return.

pub mod event_handler;
pub mod interactive_handler;
pub mod parsing;

use serde_json::Value;
use tracing::debug;

use crate::slack::SlackClient;

/// Route an acknowledged Socket Mode envelope payload to its handler.
pub async fn dispatch_envelope(client: &SlackClient, envelope_type: &str, payload: &Value) {
    match envelope_type {
        "events_api" => event_handler::handle_event_callback(client, payload).await,
        "interactive" => interactive_handler::handle_interactive(client, payload).await,
        other => {
            debug!(envelope_type = other, "no handler for envelope type");
        }
    }
}
