//! DeckDex: Magic: The Gathering card and deck lookup over DuckDB, plus a
//! one-shot importer for Scryfall bulk data.
//!
//! # Quick start
//!
//! ```no_run
//! use deckdex::{CardFilter, Deckdex};
//!
//! let dex = Deckdex::builder()
//!     .database("deckdex.duckdb")
//!     .init_schema(true)
//!     .build()
//!     .unwrap();
//!
//! // Pull the latest Scryfall snapshot into the card table
//! let summary = dex.importer().run().unwrap();
//! println!("{}/{} cards stored", summary.inserted, summary.total);
//!
//! // Query it
//! let bolts = dex.cards().search("lightning bolt", 20).unwrap();
//! let blue = dex.cards().list(&CardFilter {
//!     color: Some("U".to_string()),
//!     ..Default::default()
//! }).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod config;
pub mod connection;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod queries;
pub mod sql_builder;
pub mod transform;

#[cfg(feature = "async")]
pub use async_client::AsyncDeckdex;
pub use catalog::ScryfallClient;
pub use config::Settings;
pub use connection::Connection;
pub use error::{DeckdexError, Result};
pub use import::{BatchOptions, CardSink, ImportStage, ImportSummary, Importer};
pub use models::{Deck, NewDeck, NormalizedCard, ScryfallCard};
pub use queries::{CardFilter, Pagination};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// DeckdexBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Deckdex`] instance.
///
/// Use [`Deckdex::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DeckdexBuilder::build).
pub struct DeckdexBuilder {
    database: Option<PathBuf>,
    in_memory: bool,
    bulk_data_url: String,
    timeout: Option<Duration>,
    init_schema: bool,
}

impl Default for DeckdexBuilder {
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

impl DeckdexBuilder {
    /// Use the database file at `path`.
    ///
    /// If not set, [`config::default_database_path()`] is used.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    /// Use a throwaway in-memory database instead of a file.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Override the Scryfall bulk-data manifest URL.
    pub fn bulk_data_url(mut self, url: impl Into<String>) -> Self {
        self.bulk_data_url = url.into();
        self
    }

    /// Cap each catalog request, body download included.
    ///
    /// Unset by default: the `default_cards` snapshot is hundreds of megabytes
    /// and only the connect phase is time-limited.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create the card and deck tables on build if they are missing.
    ///
    /// Defaults to `false`, so the importer's table guard sees the database
    /// exactly as configured.
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

    /// Open the database and build the catalog client.
    pub fn build(self) -> Result<Deckdex> {
        let conn = if self.in_memory {
            Connection::open_in_memory()?
        } else {
            let path = self.database.unwrap_or_else(config::default_database_path);
            Connection::open(path)?
        };
        if self.init_schema {
            conn.ensure_schema()?;
        }
        let catalog = ScryfallClient::new(self.bulk_data_url, self.timeout)?;
        Ok(Deckdex { conn, catalog })
    }
}

// ---------------------------------------------------------------------------
// Deckdex
// ---------------------------------------------------------------------------

/// The main entry point: owns the database connection and catalog client.
///
/// Query interfaces are lightweight wrappers borrowing from it.
pub struct Deckdex {
    conn: Connection,
    catalog: ScryfallClient,
}

impl Deckdex {
    /// Create a new builder.
    pub fn builder() -> DeckdexBuilder {
        DeckdexBuilder::default()
    }

    /// Access the card query interface.
    pub fn cards(&self) -> queries::cards::CardQuery<'_> {
        queries::cards::CardQuery::new(&self.conn)
    }

    /// Access the deck query interface.
    pub fn decks(&self) -> queries::decks::DeckQuery<'_> {
        queries::decks::DeckQuery::new(&self.conn)
    }

    /// An importer writing into this database from the configured catalog.
    pub fn importer(&self) -> Importer<'_, Connection> {
        Importer::new(&self.conn, &self.catalog)
    }

    /// Check that the card table is reachable.
    pub fn ping(&self) -> Result<()> {
        self.conn.check_table(config::CARDS_TABLE)
    }

    /// Return a reference to the underlying [`Connection`].
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Return a reference to the catalog client.
    pub fn catalog(&self) -> &ScryfallClient {
        &self.catalog
    }
}

impl fmt::Display for Deckdex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deckdex(catalog={})", self.catalog.bulk_data_url)
    }
}
