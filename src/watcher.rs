use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::cache::StatusCache;
use crate::config::Config;
use crate::detect::is_notable;
use crate::error::WatchError;
use crate::extract::Extractor;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::message::format_status_message;
use crate::model::{GameStatus, WatchTarget};
use crate::notify::Notifier;

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PollReport {
    pub statuses: Vec<GameStatus>,
    pub notified: usize,
}

/// Runs poll cycles: fetch, extract, reconcile, diff against the cache, notify.
///
/// Owns the status cache and the watch targets. Targets without a date-time
/// are pinned to the first start time observed for them and keep it.
///
/// The key of a game changes when it drops off the page (no teams) or comes
/// back, so the previous status of a target is read from the key it was last
/// saved under, not from the new status's key.
pub struct Watcher {
    fetcher: Box<dyn Fetcher>,
    extractor: Extractor,
    cache: StatusCache,
    targets: RwLock<Vec<WatchTarget>>,
    /// Per target index, the cache key of its most recent status.
    last_keys: RwLock<Vec<Option<String>>>,
    season_year: i32,
}

impl Watcher {
    pub fn new(fetcher: Box<dyn Fetcher>, extractor: Extractor, targets: Vec<WatchTarget>, season_year: i32) -> Self {
        let last_keys = vec![None; targets.len()];
        Self {
            fetcher,
            extractor,
            cache: StatusCache::new(),
            targets: RwLock::new(targets),
            last_keys: RwLock::new(last_keys),
            season_year,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, WatchError> {
        let fetcher = HttpFetcher::new(config.source_url.clone(), config.retry, config.request_timeout);
        let extractor = Extractor::new(&config.selectors)?;
        Ok(Self::new(Box::new(fetcher), extractor, config.targets.clone(), config.season_year))
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    /// Current targets, including any pinned date-times.
    pub fn targets(&self) -> Vec<WatchTarget> {
        self.targets.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Run a single poll cycle.
    ///
    /// A fetch or parse failure ends the cycle before anything is written to
    /// the cache. Notification failures are logged and do not stop the cycle.
    #[instrument(level = "info", skip(self, notifier))]
    pub fn poll_once(&self, notifier: &dyn Notifier, now: DateTime<Utc>) -> Result<PollReport, WatchError> {
        let body = self.fetcher.fetch().inspect_err(|e| error!(error = %e, "Fetch failed, skipping cycle"))?;

        let targets = self.targets();
        let statuses = self
            .extractor
            .parse(&body, &targets, self.season_year, now)
            .inspect_err(|e| error!(error = %e, "Parse failed, skipping cycle"))?;

        self.pin_targets(&targets, &statuses);

        let mut notified = 0;
        for (index, status) in statuses.iter().enumerate() {
            let prev_key = self.swap_last_key(index, &status.key).unwrap_or_else(|| status.key.clone());
            let prev = self.cache.get(&prev_key);
            if is_notable(prev.as_deref(), status) {
                let message = format_status_message(status);
                info!(key = %status.key, found = status.found, is_full = status.is_full, "Game status changed");
                match notifier.send(&message) {
                    Ok(()) => notified += 1,
                    Err(e) => error!(error = %e, key = %status.key, "Notification failed"),
                }
            } else {
                info!(key = %status.key, "No change in game status - skipping notification");
            }
            self.cache.save(status.clone());
        }

        Ok(PollReport { statuses, notified })
    }

    /// Record `key` as the latest for target `index`, returning the one it replaces.
    fn swap_last_key(&self, index: usize, key: &str) -> Option<String> {
        let mut last_keys = self.last_keys.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        last_keys.get_mut(index).and_then(|slot| slot.replace(key.to_string()))
    }

    fn pin_targets(&self, seen: &[WatchTarget], statuses: &[GameStatus]) {
        let mut targets = self.targets.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        for ((slot, before), status) in targets.iter_mut().zip(seen).zip(statuses) {
            // another cycle may have pinned this target already; first one wins
            if status.found && before.date_time.is_none() && slot.date_time.is_none() {
                info!(gym = %slot.gym, date_time = ?status.target.date_time, "Pinning target to observed start time");
                *slot = status.target.clone();
            }
        }
    }
}
