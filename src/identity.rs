use chrono::SecondsFormat;

use crate::config::KEY_DELIMITER;
use crate::model::{Roster, WatchTarget};

/// Key identifying one physical game across poll cycles.
///
/// Built from gym, type, level, the UTC start time and the sorted team
/// names. Player lists never contribute, so roster churn keeps the key.
/// An unknown start time contributes an empty segment.
pub fn game_key(target: &WatchTarget, roster: &Roster) -> String {
    let date_time = target
        .date_time
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default();

    let mut teams: Vec<&str> = roster.keys().map(String::as_str).collect();
    teams.sort_unstable();

    [
        target.gym.as_str(),
        target.game_type.as_str(),
        target.level.as_str(),
        date_time.as_str(),
        teams.join(",").as_str(),
    ]
    .join(KEY_DELIMITER)
}
