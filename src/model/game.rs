use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::target::WatchTarget;

/// Team name -> player names in page order.
pub type Roster = BTreeMap<String, Vec<String>>;

/// One game card as read off the listing page, before matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub time: String,
    pub gym: String,
    pub game_type: String,
    pub level: String,
    pub roster: Roster,
    pub full_marker: bool,
}

/// Reconciled state of one watched game for a single poll cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub target: WatchTarget,
    pub found: bool,
    pub is_full: bool,
    pub roster: Roster,
    pub total_players: usize,
    pub observed_at: DateTime<Utc>,
    pub key: String,
}

impl GameStatus {
    /// Status for a target that had no matching card this cycle.
    pub fn not_found(target: WatchTarget, observed_at: DateTime<Utc>) -> Self {
        let key = crate::identity::game_key(&target, &Roster::new());
        Self {
            target,
            found: false,
            is_full: false,
            roster: Roster::new(),
            total_players: 0,
            observed_at,
            key,
        }
    }
}

/// Sum of per-team roster lengths.
pub fn total_players(roster: &Roster) -> usize {
    roster.values().map(Vec::len).sum()
}
