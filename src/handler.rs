use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{NotifierConfig, NOTIFY_TIMEOUT};
use crate::model::GameStatus;
use crate::notify::{Discord, LogNotifier, Notifier, Pushover};
use crate::watcher::Watcher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    #[default]
    Production,
}

/// Invocation payload. Scheduled events carry extra fields, which are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    #[serde(default)]
    pub notified: usize,
    #[serde(default)]
    pub statuses: Vec<GameStatus>,
}

/// Pick the notification channel for this invocation.
///
/// Test mode goes to the test Discord hook when there is one. Pushover has no
/// test channel, so test mode only logs there.
pub fn build_notifier(config: &NotifierConfig, mode: Mode) -> Box<dyn Notifier> {
    match (config, mode) {
        (NotifierConfig::Discord { hook_url, .. }, Mode::Production) => Box::new(Discord::new(hook_url.clone(), NOTIFY_TIMEOUT)),
        (NotifierConfig::Discord { test_hook_url: Some(url), .. }, Mode::Test) => Box::new(Discord::new(url.clone(), NOTIFY_TIMEOUT)),
        (NotifierConfig::Pushover { app_token, user_token }, Mode::Production) => {
            Box::new(Pushover::new(app_token.clone(), user_token.clone(), NOTIFY_TIMEOUT))
        }
        _ => Box::new(LogNotifier),
    }
}

#[instrument(skip(watcher, notifier_config, event))]
pub async fn handler(
    watcher: Arc<Watcher>,
    notifier_config: Arc<NotifierConfig>,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    let mode = event.payload.mode;

    // fetch and notify are blocking ureq calls
    let outcome = tokio::task::spawn_blocking(move || {
        let notifier = build_notifier(&notifier_config, mode);
        watcher.poll_once(notifier.as_ref(), chrono::Utc::now())
    })
    .await?;

    match outcome {
        Ok(report) => {
            let message = format!("Checked {} game(s), sent {} notification(s)", report.statuses.len(), report.notified);
            info!(message = %message, "Poll cycle complete");
            Ok(Response { message, notified: report.notified, statuses: report.statuses })
        }
        Err(e) => {
            let message = format!("Poll cycle skipped: {}", e);
            error!(error = %e, "Poll cycle skipped");
            Ok(Response { message, notified: 0, statuses: Vec::new() })
        }
    }
}
