//! Async wrapper around [`Deckdex`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use deckdex::AsyncDeckdex;
//!
//! async fn lookup() -> deckdex::Result<()> {
//!     let dex = AsyncDeckdex::builder().init_schema(true).build().await?;
//!     let card = dex.run(|d| d.cards().get("some-card-id")).await?;
//!     println!("{:?}", card);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::config::{self, Settings};
use crate::error::{DeckdexError, Result};
use crate::Deckdex;

// ---------------------------------------------------------------------------
// AsyncDeckdexBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDeckdex`] instance.
pub struct AsyncDeckdexBuilder {
    database: Option<PathBuf>,
    in_memory: bool,
    bulk_data_url: String,
    timeout: Option<Duration>,
    init_schema: bool,
}

impl Default for AsyncDeckdexBuilder {
    fn default() -> Self {
        Self {
            database: None,
            in_memory: false,
            bulk_data_url: config::BULK_DATA_URL.to_string(),
            timeout: None,
            init_schema: false,
        }
    }
}

impl AsyncDeckdexBuilder {
    /// Use the database file at `path`.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    /// Use a throwaway in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Override the Scryfall bulk-data manifest URL.
    pub fn bulk_data_url(mut self, url: impl Into<String>) -> Self {
        self.bulk_data_url = url.into();
        self
    }

    /// Cap each catalog request, body download included. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create the card and deck tables on build if they are missing.
    pub fn init_schema(mut self, init: bool) -> Self {
        self.init_schema = init;
        self
    }

    /// Apply database path, manifest URL and timeout from [`Settings`].
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.timeout = settings.http_timeout;
        self.database(&settings.database_path)
            .bulk_data_url(settings.bulk_data_url.clone())
    }

    /// Build on the blocking thread pool (opening DuckDB may touch disk).
    pub async fn build(self) -> Result<AsyncDeckdex> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Deckdex::builder();
            if self.in_memory {
                builder = builder.in_memory();
            } else if let Some(path) = self.database {
                builder = builder.database(path);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let dex = builder
                .bulk_data_url(self.bulk_data_url)
                .init_schema(self.init_schema)
                .build()?;
            Ok(AsyncDeckdex {
                inner: Arc::new(Mutex::new(dex)),
            })
        })
        .await
        .map_err(|e| DeckdexError::Internal(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDeckdex
// ---------------------------------------------------------------------------

/// Async wrapper around [`Deckdex`].
///
/// The single DuckDB connection sits behind a [`Mutex`]; operations are
/// serialized and dispatched to the blocking pool.
#[derive(Clone)]
pub struct AsyncDeckdex {
    inner: Arc<Mutex<Deckdex>>,
}

impl AsyncDeckdex {
    /// Create a new builder for configuring the async wrapper.
    pub fn builder() -> AsyncDeckdexBuilder {
        AsyncDeckdexBuilder::default()
    }

    /// Run a sync operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use deckdex::AsyncDeckdex;
    /// # async fn example() -> deckdex::Result<()> {
    /// # let dex = AsyncDeckdex::builder().build().await?;
    /// let decks = dex.run(|d| d.decks().list()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Deckdex) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dex = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            // Poisoned by a panic in an earlier closure.
            let guard = dex.lock().unwrap_or_else(PoisonError::into_inner);
            f(&guard)
        })
        .await
        .map_err(|e| DeckdexError::Internal(format!("Task join error: {e}")))?
    }

    /// Check that the card table is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.run(|d| d.ping()).await
    }
}
