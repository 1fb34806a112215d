use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DeckdexError, Result};

pub const BULK_DATA_URL: &str = "https://api.scryfall.com/bulk-data";
pub const DEFAULT_DATA_CLASS: &str = "default_cards";

pub const CARDS_TABLE: &str = "mtg_card";
pub const DECKS_TABLE: &str = "deck";

/// Number of cards submitted per upsert.
pub const BATCH_SIZE: usize = 100;
/// Pause between consecutive batches (not after the last one).
pub const BATCH_PAUSE: Duration = Duration::from_millis(100);

/// Scryfall asks API clients to identify themselves.
pub const USER_AGENT: &str = concat!("deckdex/", env!("CARGO_PKG_VERSION"));

/// Limit on establishing a catalog connection. Reading the bulk body is unbounded
/// unless `DECKDEX_HTTP_TIMEOUT_SECS` is set.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

pub fn default_database_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("deckdex").join("deckdex.duckdb")
    } else {
        PathBuf::from(".deckdex").join("deckdex.duckdb")
    }
}

/// Load variables from `path`, or from `.env` in the working directory or its
/// parents when `path` is `None`.
///
/// A missing file is fine. An unreadable or malformed one is a
/// [`DeckdexError::Config`].
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match loaded {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Runtime settings read from the environment (and `.env`, if present).
///
/// | variable | default |
/// |---|---|
/// | `DECKDEX_DATABASE` | [`default_database_path()`] |
/// | `SCRYFALL_BULK_DATA_URL` | [`BULK_DATA_URL`] |
/// | `DECKDEX_HTTP_TIMEOUT_SECS` | unset (no total request limit) |
/// | `DECKDEX_HOST` | `0.0.0.0` |
/// | `DECKDEX_PORT` | 8000 |
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bulk_data_url: String,
    /// Total per-request limit, body included. `None` means no limit.
    pub http_timeout: Option<Duration>,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            bulk_data_url: BULK_DATA_URL.to_string(),
            http_timeout: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        load_env_file(None)?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(path) = get("DECKDEX_DATABASE") {
            settings.database_path = PathBuf::from(path);
        }
        if let Some(url) = get("SCRYFALL_BULK_DATA_URL") {
            settings.bulk_data_url = url;
        }
        if let Some(raw) = get("DECKDEX_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DeckdexError::InvalidArgument(format!(
                    "DECKDEX_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            settings.http_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(host) = get("DECKDEX_HOST") {
            settings.host = host;
        }
        if let Some(raw) = get("DECKDEX_PORT") {
            settings.port = raw.trim().parse().map_err(|_| {
                DeckdexError::InvalidArgument(format!("DECKDEX_PORT is not a valid port: '{}'", raw))
            })?;
        }

        Ok(settings)
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
