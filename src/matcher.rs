use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::fullness;
use crate::gametime::{parse_game_time, year_for};
use crate::identity::game_key;
use crate::model::game::total_players;
use crate::model::{GameRecord, GameStatus, WatchTarget};

/// First record in page order that satisfies `target`, with its parsed start time.
///
/// Gym, type and level compare case-insensitively. A record whose time does
/// not parse is passed over. When the target carries a date-time, the
/// record must start at that exact instant.
pub fn find_match<'a>(
    records: &'a [GameRecord],
    target: &WatchTarget,
    season_year: i32,
) -> Option<(&'a GameRecord, DateTime<Utc>)> {
    let year = year_for(target, season_year);
    records
        .iter()
        .filter(|r| target.matches_fields(&r.gym, &r.game_type, &r.level))
        .find_map(|record| {
            let start = match parse_game_time(&record.time, year) {
                Ok(start) => start,
                Err(e) => {
                    warn!(error = %e, gym = %record.gym, "Skipping card with unreadable time");
                    return None;
                }
            };
            match target.date_time {
                Some(wanted) if wanted != start => None,
                _ => Some((record, start)),
            }
        })
}

/// Build this cycle's status for every target, in target order.
pub fn reconcile(
    records: &[GameRecord],
    targets: &[WatchTarget],
    season_year: i32,
    observed_at: DateTime<Utc>,
) -> Vec<GameStatus> {
    targets
        .iter()
        .map(|target| match find_match(records, target, season_year) {
            Some((record, start)) => matched_status(record, target, start, observed_at),
            None => {
                info!(gym = %target.gym, game_type = %target.game_type, level = %target.level, "Game not posted");
                GameStatus::not_found(target.clone(), observed_at)
            }
        })
        .collect()
}

fn matched_status(
    record: &GameRecord,
    target: &WatchTarget,
    start: DateTime<Utc>,
    observed_at: DateTime<Utc>,
) -> GameStatus {
    let resolved = target.clone().with_date_time(target.date_time.unwrap_or(start));
    let total = total_players(&record.roster);
    let is_full = fullness::is_full(record.full_marker, total);
    let key = game_key(&resolved, &record.roster);

    info!(key = %key, total_players = total, is_full, "Found the game");

    GameStatus {
        target: resolved,
        found: true,
        is_full,
        roster: record.roster.clone(),
        total_players: total,
        observed_at,
        key,
    }
}
