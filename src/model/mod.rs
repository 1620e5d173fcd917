pub mod game;
pub mod target;

pub use game::{GameRecord, GameStatus, Roster};
pub use target::WatchTarget;
