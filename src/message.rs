use crate::fullness::open_spots;
use crate::model::GameStatus;

/// Format a push-friendly message for a status change.
pub fn format_status_message(status: &GameStatus) -> String {
    let target = &status.target;

    // Localize to Pacific time
    let when = target
        .local_date_time()
        .map(|dt| dt.format("%A, %B %-d at %-I:%M %p").to_string())
        .unwrap_or_else(|| "Date not posted yet".to_string());

    let state = if !status.found {
        "Not posted yet".to_string()
    } else if status.is_full {
        "FULL".to_string()
    } else {
        format!("Open ({} players, {} spots left)", status.total_players, open_spots(status.total_players))
    };

    let mut out = format!("{}\n{}\n{}\n{}\n{}\n", target.gym, target.game_type, target.level, when, state);
    for (team, players) in &status.roster {
        out.push_str(&format!("{}: {}\n", team, players.len()));
        out.push_str(&players.join(", "));
        out.push('\n');
    }
    out
}
