use chrono::{DateTime, Utc};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Which game are we watching?
///
/// `date_time` is optional: a target without one matches the first game with
/// the right gym, type and level, then adopts that game's start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchTarget {
    pub gym: String,
    pub game_type: String,
    pub level: String,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
}

impl WatchTarget {
    pub fn new(gym: impl Into<String>, game_type: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            gym: gym.into(),
            game_type: game_type.into(),
            level: level.into(),
            date_time: None,
        }
    }

    pub fn with_date_time(mut self, date_time: DateTime<Utc>) -> Self {
        self.date_time = Some(date_time);
        self
    }

    /// Start time in league-local (Pacific) time, if known.
    pub fn local_date_time(&self) -> Option<DateTime<Tz>> {
        self.date_time.map(|dt| dt.with_timezone(&Los_Angeles))
    }

    /// Case-insensitive comparison of the gym/type/level triple.
    pub fn matches_fields(&self, gym: &str, game_type: &str, level: &str) -> bool {
        self.gym.eq_ignore_ascii_case(gym)
            && self.game_type.eq_ignore_ascii_case(game_type)
            && self.level.eq_ignore_ascii_case(level)
    }
}
