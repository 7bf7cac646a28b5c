use tracing::{error, info};

use worklink::core::config::AppConfig;
use worklink::errors::SlackError;
use worklink::slack::{SlackClient, SocketModeListener};

#[tokio::main]
async fn main() -> Result<(), SlackError> {
    worklink::setup_logging();

    let config = AppConfig::from_env()?;
    let client = SlackClient::new(config.slack_bot_token.clone());
    let listener = SocketModeListener::new(config.slack_app_token.clone(), config.reconnect.clone());

    info!("worklink app is running");

    tokio::select! {
        result = listener.run(&client) => {
            if let Err(e) = &result {
                error!(error = %e, "socket mode listener failed");
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    }
}
