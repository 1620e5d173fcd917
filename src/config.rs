//! Runtime configuration and page-structure constants.
//!
//! Everything that depends on the exact markup of the registration page lives
//! in [`Selectors`], so a layout change on the site is a config edit.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, Utc};
use chrono_tz::America::Los_Angeles;

use crate::error::WatchError;
use crate::fetch::RetryPolicy;
use crate::model::WatchTarget;

/// Hoops-on-Demand registration page.
pub const SOURCE_URL: &str = "https://mobile.pugetsoundbasketball.com/registration-hod.php";

/// Landing page linked from notifications.
pub const SITE_URL: &str = "https://mobile.pugetsoundbasketball.com/";

/// Total signed-up players at which a game counts as full (7 per side).
pub const CAPACITY_THRESHOLD: usize = 14;

/// Upper bound on a single notification request.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Separator between the segments of a game key.
pub const KEY_DELIMITER: &str = "|";

/// CSS selectors describing where things live on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// One per game card.
    pub card: String,
    /// Header block holding time, gym, type and level on separate lines.
    pub header: String,
    pub roster: String,
    /// One per team column inside the roster; the site has no semantic markup.
    pub team: String,
    pub team_name: String,
    pub player_name: String,
    /// Elements whose text may carry the full marker.
    pub full_marker: String,
    pub full_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            card: "div.mobilehod".to_string(),
            header: "#gameinfo div".to_string(),
            roster: "#roster".to_string(),
            team: "div[style*='float:left;width:50%']".to_string(),
            team_name: "span.team_name".to_string(),
            player_name: "span.player_name".to_string(),
            full_marker: "a".to_string(),
            full_text: "FULL".to_string(),
        }
    }
}

/// Where notifications go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierConfig {
    Pushover { app_token: String, user_token: String },
    Discord { hook_url: String, test_hook_url: Option<String> },
    /// Nothing configured: notifications are only logged.
    Log,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub targets: Vec<WatchTarget>,
    /// Year assumed for page times when a target has no date of its own.
    pub season_year: i32,
    pub source_url: String,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
    pub selectors: Selectors,
    pub notifier: NotifierConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, WatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_targets = get("WATCH_TARGETS")
            .ok_or_else(|| WatchError::Config("WATCH_TARGETS must be set".to_string()))?;
        let targets: Vec<WatchTarget> = serde_json::from_str(&raw_targets)
            .map_err(|e| WatchError::Config(format!("WATCH_TARGETS is not a valid target list: {}", e)))?;
        if targets.is_empty() {
            return Err(WatchError::Config("WATCH_TARGETS must name at least one game".to_string()));
        }

        let season_year = parse_var::<i32, _>(&get, "SEASON_YEAR")?
            .unwrap_or_else(|| Utc::now().with_timezone(&Los_Angeles).year());

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: parse_var(&get, "FETCH_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
            initial_backoff: parse_var(&get, "FETCH_INITIAL_BACKOFF_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.initial_backoff),
            max_backoff: parse_var(&get, "FETCH_MAX_BACKOFF_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_backoff),
        };

        let request_timeout = parse_var(&get, "FETCH_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(15));

        let notifier = match (get("PUSHOVER_APP_TOKEN"), get("PUSHOVER_USER_TOKEN"), get("DISCORD_HOOK_URL")) {
            (Some(app_token), Some(user_token), _) => NotifierConfig::Pushover { app_token, user_token },
            (_, _, Some(hook_url)) => NotifierConfig::Discord {
                hook_url,
                test_hook_url: get("TEST_DISCORD_HOOK_URL"),
            },
            _ => NotifierConfig::Log,
        };

        Ok(Config {
            targets,
            season_year,
            source_url: get("SOURCE_URL").unwrap_or_else(|| SOURCE_URL.to_string()),
            retry,
            request_timeout,
            selectors: Selectors::default(),
            notifier,
        })
    }
}

/// Parse an optional variable; a value that is set but malformed is an error.
fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>, WatchError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| WatchError::Config(format!("{} has invalid value {:?}: {}", key, v, e)))
        })
        .transpose()
}
