use std::env;

use crate::errors::SlackError;
use crate::slack::socket::ReconnectPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    pub reconnect: ReconnectPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SlackError> {
        let defaults = ReconnectPolicy::default();
        Ok(Self {
            slack_bot_token: require("SLACK_BOT_TOKEN")?,
            slack_app_token: require("SLACK_APP_TOKEN")?,
            reconnect: ReconnectPolicy {
                max_retries: parse_or("SOCKET_MAX_RETRIES", defaults.max_retries),
                base_delay_ms: parse_or("SOCKET_BASE_DELAY_MS", defaults.base_delay_ms),
                max_delay_ms: parse_or("SOCKET_MAX_DELAY_MS", defaults.max_delay_ms),
            },
        })
    }
}

fn require(name: &str) -> Result<String, SlackError> {
    env::var(name).map_err(|e| SlackError::ConfigError(format!("{name}: {e}")))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
