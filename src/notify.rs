use std::time::Duration;

use tracing::{error, info};

use crate::config::SITE_URL;
use crate::error::WatchError;
use crate::fetch::http_agent;

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

/// Delivers a formatted status message somewhere a human will see it.
pub trait Notifier: Send + Sync {
    fn send(&self, message: &str) -> Result<(), WatchError>;
}

/// Posts status messages to a Discord channel webhook.
#[derive(Clone)]
pub struct Discord {
    hook_url: String,
    agent: ureq::Agent,
}

impl Discord {
    pub fn new(hook_url: String, timeout: Duration) -> Self {
        Self { hook_url, agent: http_agent(timeout) }
    }

    /// Webhook body for one message. Mentions are disabled so a player
    /// registered as "@everyone" cannot ping the channel.
    pub fn payload(&self, message: &str) -> serde_json::Value {
        serde_json::json!({
            "content": message,
            "allowed_mentions": { "parse": [] },
        })
    }
}

impl Notifier for Discord {
    fn send(&self, message: &str) -> Result<(), WatchError> {
        let resp = self
            .agent
            .post(&self.hook_url)
            .send_json(self.payload(message))
            .map_err(|e| {
                error!(error = %e, "Discord webhook rejected status message");
                WatchError::Notify(format!("Discord webhook: {}", e))
            })?;
        info!(status = resp.status().as_u16(), "Status message posted to Discord");
        Ok(())
    }
}

/// Pushover client. Messages go out at emergency priority so they repeat
/// until acknowledged.
#[derive(Clone)]
pub struct Pushover {
    app_token: String,
    user_token: String,
    agent: ureq::Agent,
}

impl Pushover {
    pub fn new(app_token: String, user_token: String, timeout: Duration) -> Self {
        Self { app_token, user_token, agent: http_agent(timeout) }
    }

    /// Form fields for one message.
    pub fn form(&self, message: &str) -> Vec<(&'static str, String)> {
        vec![
            ("token", self.app_token.clone()),
            ("user", self.user_token.clone()),
            ("title", "Hoops Game Update".to_string()),
            ("message", message.to_string()),
            ("priority", "2".to_string()),
            ("sound", "bugle".to_string()),
            ("retry", "60".to_string()),
            ("expire", "300".to_string()),
            ("url", SITE_URL.to_string()),
            ("url_title", "View Game".to_string()),
        ]
    }
}

impl Notifier for Pushover {
    fn send(&self, message: &str) -> Result<(), WatchError> {
        match self.agent.post(PUSHOVER_URL).send_form(self.form(message)) {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), "Sent Pushover notification");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to send Pushover notification");
                Err(WatchError::Notify(format!("Failed to send Pushover notification: {}", e)))
            }
        }
    }
}

/// Writes messages to the log only. Used when no channel is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &str) -> Result<(), WatchError> {
        info!(message = %message, "Notification (log only)");
        Ok(())
    }
}
