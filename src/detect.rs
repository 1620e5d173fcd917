use crate::model::GameStatus;

/// Should moving from `prev` to `curr` trigger a notification?
///
/// A first sighting always does. After that, any change in found/full,
/// player count or roster contents (team for team, player for player, in
/// order) counts. Timestamps are ignored.
pub fn is_notable(prev: Option<&GameStatus>, curr: &GameStatus) -> bool {
    let Some(prev) = prev else {
        return true;
    };

    prev.found != curr.found
        || prev.is_full != curr.is_full
        || prev.total_players != curr.total_players
        || prev.roster != curr.roster
}
