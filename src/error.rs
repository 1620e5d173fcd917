use thiserror::Error;

/// Failures the watcher can run into. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("fetch failed after {attempts} attempt(s): {reason}")]
    Fetch { attempts: u32, reason: String },

    #[error("document could not be parsed: {0}")]
    Parse(String),

    #[error("invalid game time {input:?}: {reason}")]
    TimeParse { input: String, reason: String },

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("configuration error: {0}")]
    Config(String),
}
