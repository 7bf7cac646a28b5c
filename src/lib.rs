/// worklink - A Slack Socket Mode app that unfurls task and document links
/// as work objects.
///
/// The app subscribes to `link_shared` events for `example.com/task/<id>` and
/// `example.com/file/<id>` URLs and replies with entity unfurl metadata via
/// `chat.unfurl`. When a user opens an unfurled entity, the
/// `entity_details_requested` event is answered with a richer detail view via
/// `entity.presentDetails`. The detail view exposes a handful of demo buttons
/// whose clicks arrive as `block_actions` payloads and are acknowledged with a
/// canned DM.
///
/// # Architecture
///
/// The system uses:
/// - Socket Mode (`apps.connections.open` + WebSocket) for event delivery
/// - slack-morphism for typed Slack Web API interactions
/// - reqwest for Slack Web API methods slack-morphism does not model
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use worklink::core::config::AppConfig;
/// use worklink::slack::{SlackClient, SocketModeListener};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     worklink::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let client = SlackClient::new(config.slack_bot_token.clone());
///
///     // Run the Socket Mode listener until its retry budget is exhausted
///     let listener = SocketModeListener::new(config.slack_app_token, config.reconnect);
///     listener.run(&client).await?;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod core;
pub mod errors;
pub mod events;
pub mod slack;
pub mod utils;

/// Configure structured logging with JSON format.
///
/// This function sets up tracing-subscriber with a JSON formatter and an
/// `EnvFilter` driven by `RUST_LOG` (default level `info`). It should be
/// called once at process start.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of main
/// worklink::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
