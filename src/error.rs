#[derive(Debug, thiserror::Error)]
pub enum DeckdexError {
    #[error("Database error: {0}")]
    Persistence(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] dotenvy::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A blocking task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DeckdexError>;
