//! Slack Socket Mode transport.
//!
//! Obtains a WebSocket URL via `apps.connections.open` (app-level token),
//! then pumps envelopes off the socket: each `events_api` / `interactive`
//! envelope is acknowledged with its envelope id before being routed to the
//! event handlers. Slack refreshes Socket Mode connections periodically by
//! sending a `disconnect` frame; the listener reconnects with capped
//! exponential backoff and gives up gracefully once the retry budget for
//! consecutive failures is spent.

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::errors::SlackError;
use crate::events;
use crate::slack::client::{HTTP_CLIENT, SlackClient};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
        }
    }
}

impl ReconnectPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let multiplier = 1_u64 << exponent;
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(multiplier)
            .min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

/// An envelope delivered over the Socket Mode connection.
#[derive(Debug, Deserialize)]
struct SocketEnvelope {
    envelope_id: String,
    #[serde(rename = "type")]
    envelope_type: String,
    #[serde(default)]
    payload: Value,
}

/// Why a healthy socket session ended.
enum SessionEnd {
    /// Slack asked for a reconnect (`disconnect` frame).
    Refresh,
    /// The peer closed the stream.
    Closed,
}

/// Socket Mode listener: owns the app-level token and reconnect policy.
pub struct SocketModeListener {
    app_token: String,
    policy: ReconnectPolicy,
}

impl SocketModeListener {
    #[must_use]
    pub fn new(app_token: String, policy: ReconnectPolicy) -> Self {
        Self { app_token, policy }
    }

    /// Run the Socket Mode loop until the retry budget for consecutive
    /// connection failures is exhausted.
    ///
    /// A session that ends normally (refresh or peer close) resets the
    /// failure counter and reconnects immediately.
    ///
    /// # Errors
    ///
    /// Currently degrades gracefully instead of failing; the `Result` return
    /// leaves room for fatal transport errors to surface later.
    pub async fn run(&self, client: &SlackClient) -> Result<(), SlackError> {
        let mut attempt: u32 = 0;

        loop {
            match self.connect_and_pump(client).await {
                Ok(SessionEnd::Refresh) => {
                    attempt = 0;
                    info!("socket mode refresh requested; reconnecting");
                }
                Ok(SessionEnd::Closed) => {
                    attempt = 0;
                    info!("socket mode connection closed by peer; reconnecting");
                }
                Err(error) => {
                    warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        error = %error,
                        "socket mode connection failed"
                    );

                    if attempt >= self.policy.max_retries {
                        warn!(
                            max_retries = self.policy.max_retries,
                            "socket mode retries exhausted; stopping listener"
                        );
                        return Ok(());
                    }

                    let delay = self.policy.backoff(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn connect_and_pump(&self, client: &SlackClient) -> Result<SessionEnd, SlackError> {
        let ws_url = connections_open(&self.app_token).await?;

        info!("opening socket mode connection");
        let (ws_stream, _) = connect_async(&ws_url)
            .await
            .map_err(|e| SlackError::TransportError(format!("websocket connect: {e}")))?;
        info!("socket mode connected");

        let (mut sink, mut stream) = ws_stream.split();

        while let Some(frame) = stream.next().await {
            let text = match frame {
                Ok(Message::Text(t)) => t,
                Ok(Message::Ping(data)) => {
                    sink.send(Message::Pong(data))
                        .await
                        .map_err(|e| SlackError::TransportError(format!("pong send: {e}")))?;
                    continue;
                }
                Ok(Message::Close(_)) => return Ok(SessionEnd::Closed),
                Ok(_) => continue,
                Err(e) => {
                    return Err(SlackError::TransportError(format!("websocket read: {e}")));
                }
            };

            let frame: Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = %e, "unparseable socket frame; skipping");
                    continue;
                }
            };

            match frame.get("type").and_then(Value::as_str).unwrap_or("") {
                "hello" => {
                    info!("socket mode hello received");
                }
                "disconnect" => {
                    let reason = frame
                        .get("reason")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    info!(reason, "socket mode disconnect requested");
                    return Ok(SessionEnd::Refresh);
                }
                "events_api" | "interactive" | "slash_commands" => {
                    let envelope: SocketEnvelope = match serde_json::from_value(frame.clone()) {
                        Ok(envelope) => envelope,
                        Err(e) => {
                            warn!(error = %e, "malformed socket envelope; skipping");
                            continue;
                        }
                    };

                    // Ack first, then dispatch: the ack is the Socket Mode
                    // equivalent of responding 200 to an Events API delivery.
                    let ack = json!({ "envelope_id": envelope.envelope_id }).to_string();
                    sink.send(Message::Text(ack)).await.map_err(|e| {
                        SlackError::TransportError(format!("envelope ack send: {e}"))
                    })?;
                    debug!(
                        envelope_id = %envelope.envelope_id,
                        envelope_type = %envelope.envelope_type,
                        "acknowledged socket envelope"
                    );

                    events::dispatch_envelope(client, &envelope.envelope_type, &envelope.payload)
                        .await;
                }
                other => {
                    debug!(frame_type = other, "ignoring socket frame");
                }
            }
        }

        Ok(SessionEnd::Closed)
    }
}

/// Call `apps.connections.open` with the app-level token to obtain a
/// WebSocket URL for a fresh Socket Mode connection.
async fn connections_open(app_token: &str) -> Result<String, SlackError> {
    let resp = HTTP_CLIENT
        .post("https://slack.com/api/apps.connections.open")
        .bearer_auth(app_token)
        .send()
        .await
        .map_err(|e| SlackError::TransportError(format!("apps.connections.open: {e}")))?;

    if !resp.status().is_success() {
        return Err(SlackError::TransportError(format!(
            "apps.connections.open HTTP {}",
            resp.status()
        )));
    }

    let body: Value = resp.json().await.map_err(|e| {
        SlackError::ParseError(format!("apps.connections.open JSON parse error: {e}"))
    })?;

    if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Err(SlackError::ApiError(format!(
            "apps.connections.open error: {}",
            body.get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
        )));
    }

    body.get("url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SlackError::ParseError("apps.connections.open response missing url".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially_and_caps() {
        let policy = ReconnectPolicy {
            max_retries: 10,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
        };

        assert_eq!(policy.backoff(0), Duration::from_millis(250));
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1_000));
        assert_eq!(policy.backoff(10), Duration::from_millis(5_000));
        // Large attempts must not overflow the shift.
        assert_eq!(policy.backoff(u32::MAX), Duration::from_millis(5_000));
    }

    #[test]
    fn zero_base_delay_backs_off_to_zero() {
        let policy = ReconnectPolicy {
            max_retries: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
        };
        assert!(policy.backoff(3).is_zero());
    }

    #[test]
    fn deserializes_socket_envelope() {
        let frame = r#"{
            "envelope_id": "env-1",
            "type": "events_api",
            "accepts_response_payload": false,
            "payload": { "type": "event_callback", "event": { "type": "link_shared" } }
        }"#;

        let envelope: SocketEnvelope = serde_json::from_str(frame).expect("envelope parses");
        assert_eq!(envelope.envelope_id, "env-1");
        assert_eq!(envelope.envelope_type, "events_api");
        assert_eq!(
            envelope.payload["event"]["type"],
            serde_json::json!("link_shared")
        );
    }
}
