use thiserror::Error;

/// Errors raised by the file-backed parts of the game (content, config, saves).
#[derive(Debug, Error)]
pub enum GameError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON content or save file did not match its schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML config file could not be parsed.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A content file parsed but held nothing playable.
    #[error("invalid content in {path}: {reason}")]
    InvalidContent { path: String, reason: String },
}
