//! Slack API client module
//!
//! Encapsulates all outbound Slack Web API interactions with retry logic and
//! error handling. Typed slack-morphism requests cover the methods it models;
//! `chat.unfurl` with entity metadata and `entity.presentDetails` are newer
//! surfaces and go through plain HTTP.

use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{SlackApiChatPostMessageRequest, SlackApiConversationsOpenRequest};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackUserId,
};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::warn;

use crate::errors::SlackError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

pub(crate) static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    #[must_use]
    pub fn token(&self) -> &SlackApiToken {
        &self.token
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SlackError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SlackError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        Retry::spawn(strategy, operation).await
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails or response parsing fails.
    pub async fn get_user_im_channel(&self, user_id: &str) -> Result<String, SlackError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    SlackError::ApiError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);
            let open_req = SlackApiConversationsOpenRequest::new()
                .with_users(vec![SlackUserId(user_id.to_string())]);

            let result = session.conversations_open(&open_req).await?;
            let channel_id = result.channel.id.0;
            Ok(channel_id)
        })
        .await
    }

    /// Send a plain-text DM to a user, opening the IM conversation first.
    ///
    /// # Errors
    pub async fn send_dm(&self, user_id: &str, message: &str) -> Result<(), SlackError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    SlackError::ApiError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);
            let im_channel = self.get_user_im_channel(user_id).await?;

            let post_req = SlackApiChatPostMessageRequest::new(
                SlackChannelId(im_channel),
                SlackMessageContent::new().with_text(message.to_string()),
            );

            session.chat_post_message(&post_req).await?;

            Ok(())
        })
        .await
    }

    /// Attach work-object unfurl metadata to a message via `chat.unfurl`.
    ///
    /// The entity-metadata variant of `chat.unfurl` is not modeled by
    /// slack-morphism, so the request goes through plain HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Slack returns an error.
    pub async fn chat_unfurl(
        &self,
        channel: &str,
        message_ts: &str,
        metadata: &Value,
    ) -> Result<(), SlackError> {
        let payload = json!({
            "channel": channel,
            "ts": message_ts,
            "metadata": metadata,
        });

        self.with_retry(|| async {
            let resp = HTTP_CLIENT
                .post("https://slack.com/api/chat.unfurl")
                .bearer_auth(&self.token.token_value.0)
                .json(&payload)
                .send()
                .await
                .map_err(|e| SlackError::HttpError(format!("Failed to send unfurl: {e}")))?;

            if !resp.status().is_success() {
                return Err(SlackError::ApiError(format!(
                    "chat.unfurl HTTP {}",
                    resp.status()
                )));
            }

            let body: Value = resp
                .json()
                .await
                .map_err(|e| SlackError::ParseError(format!("chat.unfurl JSON parse error: {e}")))?;

            if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
                return Err(SlackError::ApiError(format!(
                    "chat.unfurl error: {}",
                    body.get("error")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                )));
            }

            Ok(())
        })
        .await
    }

    /// Present an entity detail view via `entity.presentDetails`.
    ///
    /// No retry here: the trigger id expires within seconds, so a late retry
    /// can only fail again.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Slack returns an error.
    pub async fn entity_present_details(
        &self,
        trigger_id: &str,
        metadata: &Value,
    ) -> Result<(), SlackError> {
        let payload = json!({
            "trigger_id": trigger_id,
            "metadata": metadata,
        });

        let resp = HTTP_CLIENT
            .post("https://slack.com/api/entity.presentDetails")
            .bearer_auth(&self.token.token_value.0)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("Failed to present details: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "entity.presentDetails HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp.json().await.map_err(|e| {
            SlackError::ParseError(format!("entity.presentDetails JSON parse error: {e}"))
        })?;

        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(SlackError::ApiError(format!(
                "entity.presentDetails error: {}",
                body.get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
            )));
        }

        Ok(())
    }
}
