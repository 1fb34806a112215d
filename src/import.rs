//! Scryfall bulk import: table guard → manifest → download → transform → batched upsert.
//!
//! The run is strictly sequential. A failed guard, manifest lookup or download
//! aborts the run. A failed batch is logged and skipped: its cards are dropped
//! and the next batch proceeds. Each batch's outcome is kept in the returned
//! [`ImportSummary`].

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{error, info};

use crate::catalog::ScryfallClient;
use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::NormalizedCard;
use crate::transform::process_card;

// ---------------------------------------------------------------------------
// CardSink
// ---------------------------------------------------------------------------

/// Destination for imported cards.
pub trait CardSink {
    /// Fail if `table` cannot be read.
    fn check_table(&self, table: &str) -> Result<()>;

    /// Insert-or-update `cards` into `table`, keyed by id. Returns the number written.
    fn upsert_cards(&self, table: &str, cards: &[NormalizedCard]) -> Result<usize>;
}

impl CardSink for Connection {
    fn check_table(&self, table: &str) -> Result<()> {
        Connection::check_table(self, table)
    }

    fn upsert_cards(&self, table: &str, cards: &[NormalizedCard]) -> Result<usize> {
        Connection::upsert_cards(self, table, cards)
    }
}

// ---------------------------------------------------------------------------
// Batching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub batch_size: usize,
    /// Sleep between batches; skipped after the last one.
    pub pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: config::BATCH_SIZE,
            pause: config::BATCH_PAUSE,
        }
    }
}

/// Outcome of one batch: cards written, or the error text.
pub type BatchResult = std::result::Result<usize, String>;

/// What an upsert pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Cards handed to the upserter.
    pub total: usize,
    /// Cards in batches that succeeded.
    pub inserted: usize,
    /// One entry per batch, in submission order.
    pub batches: Vec<BatchResult>,
}

impl ImportSummary {
    /// Number of batches that failed.
    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.is_err()).count()
    }

    /// Cards dropped because their batch failed.
    pub fn dropped(&self) -> usize {
        self.total - self.inserted
    }
}

/// Upsert `cards` in fixed-size batches. See [`insert_cards_with`].
pub fn insert_cards<S: CardSink + ?Sized>(
    sink: &S,
    table: &str,
    cards: &[NormalizedCard],
    options: BatchOptions,
) -> ImportSummary {
    insert_cards_with(sink, table, cards, options, |_| {})
}

/// Upsert `cards` in fixed-size batches, calling `on_batch(i)` before batch `i`.
///
/// A failing batch is logged and skipped; its cards are not retried.
pub fn insert_cards_with<S, F>(
    sink: &S,
    table: &str,
    cards: &[NormalizedCard],
    options: BatchOptions,
    mut on_batch: F,
) -> ImportSummary
where
    S: CardSink + ?Sized,
    F: FnMut(usize),
{
    let total = cards.len();
    let batch_size = options.batch_size.max(1);
    let batch_count = total.div_ceil(batch_size);
    let mut inserted = 0;
    let mut batches = Vec::with_capacity(batch_count);

    info!("Inserting {} cards in {} batches...", total, batch_count);

    for (i, batch) in cards.chunks(batch_size).enumerate() {
        on_batch(i);
        match sink.upsert_cards(table, batch) {
            Ok(_) => {
                inserted += batch.len();
                let progress = inserted as f64 / total as f64 * 100.0;
                info!(
                    "Progress: {}/{} cards inserted ({:.2}%)",
                    inserted, total, progress
                );
                batches.push(Ok(batch.len()));
            }
            Err(e) => {
                error!("Error inserting batch {}: {}", i + 1, e);
                batches.push(Err(e.to_string()));
            }
        }

        if i + 1 < batch_count && !options.pause.is_zero() {
            thread::sleep(options.pause);
        }
    }

    info!("Inserted {} cards successfully.", inserted);
    ImportSummary {
        total,
        inserted,
        batches,
    }
}

// ---------------------------------------------------------------------------
// Importer
// ---------------------------------------------------------------------------

/// Where an import run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    FetchingManifest,
    Downloading,
    Transforming,
    /// Submitting batch `n` (zero-based).
    Upserting(usize),
    Done,
    Aborted,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStage::Idle => write!(f, "idle"),
            ImportStage::FetchingManifest => write!(f, "fetching manifest"),
            ImportStage::Downloading => write!(f, "downloading"),
            ImportStage::Transforming => write!(f, "transforming"),
            ImportStage::Upserting(n) => write!(f, "upserting batch {}", n + 1),
            ImportStage::Done => write!(f, "done"),
            ImportStage::Aborted => write!(f, "aborted"),
        }
    }
}

/// One-shot Scryfall → table import.
///
/// ```no_run
/// use deckdex::Deckdex;
///
/// let dex = Deckdex::builder().build().unwrap();
/// let summary = dex.importer().run().unwrap();
/// println!("{} of {} cards stored", summary.inserted, summary.total);
/// ```
pub struct Importer<'a, S: CardSink + ?Sized> {
    sink: &'a S,
    catalog: &'a ScryfallClient,
    table: String,
    data_type: String,
    options: BatchOptions,
    stage: ImportStage,
}

impl<'a, S: CardSink + ?Sized> Importer<'a, S> {
    /// Importer writing to [`config::CARDS_TABLE`] from the `default_cards` snapshot.
    pub fn new(sink: &'a S, catalog: &'a ScryfallClient) -> Self {
        Self {
            sink,
            catalog,
            table: config::CARDS_TABLE.to_string(),
            data_type: config::DEFAULT_DATA_CLASS.to_string(),
            options: BatchOptions::default(),
            stage: ImportStage::Idle,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn batch_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Run the whole import.
    ///
    /// Returns an error (and ends in [`ImportStage::Aborted`]) when the table
    /// guard, manifest lookup or download fails. Batch failures do not fail
    /// the run; they show up in the summary.
    pub fn run(&mut self) -> Result<ImportSummary> {
        if let Err(e) = self.sink.check_table(&self.table) {
            error!("Error checking table: {}", e);
            error!(
                "Please make sure the '{}' table is created before importing.",
                self.table
            );
            return self.abort(e);
        }
        info!("Table '{}' exists and is ready for data.", self.table);

        self.stage = ImportStage::FetchingManifest;
        let uri = match self.catalog.bulk_data_uri(&self.data_type) {
            Ok(uri) => uri,
            Err(e) => {
                error!("Error getting bulk data URI: {}", e);
                return self.abort(e);
            }
        };

        self.stage = ImportStage::Downloading;
        let raw = match self.catalog.download_cards(&uri) {
            Ok(cards) => cards,
            Err(e) => {
                error!("Error downloading bulk data: {}", e);
                return self.abort(e);
            }
        };

        self.stage = ImportStage::Transforming;
        let cards: Vec<NormalizedCard> = raw.iter().map(process_card).collect();
        drop(raw);

        let sink = self.sink;
        let stage = &mut self.stage;
        let summary = insert_cards_with(sink, &self.table, &cards, self.options, |i| {
            *stage = ImportStage::Upserting(i);
        });

        self.stage = ImportStage::Done;
        Ok(summary)
    }

    fn abort<T>(&mut self, e: crate::error::DeckdexError) -> Result<T> {
        self.stage = ImportStage::Aborted;
        Err(e)
    }
}
