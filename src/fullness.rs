use crate::config::CAPACITY_THRESHOLD;

/// A game is full when the page says so or the roster has reached capacity.
pub fn is_full(full_marker: bool, total_players: usize) -> bool {
    full_marker || total_players >= CAPACITY_THRESHOLD
}

/// Open spots left before the player-count threshold, ignoring the marker.
pub fn open_spots(total_players: usize) -> usize {
    CAPACITY_THRESHOLD.saturating_sub(total_players)
}
