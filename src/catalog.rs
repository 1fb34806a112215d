//! Scryfall bulk-data client.
//!
//! Resolves a bulk-data class (e.g. `default_cards`) to its current download
//! URI via the manifest endpoint, then downloads and parses the card array.
//! Failures are returned to the caller; nothing is retried.

use crate::config;
use crate::error::{DeckdexError, Result};
use crate::models::{BulkDataList, ScryfallCard};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;

/// Blocking HTTP client for the Scryfall catalog.
pub struct ScryfallClient {
    /// Manifest endpoint (the `bulk-data` listing).
    pub bulk_data_url: String,
    client: Client,
}

impl ScryfallClient {
    /// Create a client against `bulk_data_url`.
    ///
    /// Only connecting is time-limited by default. `timeout`, when given, caps
    /// each whole request including the body download.
    pub fn new(bulk_data_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config::CONNECT_TIMEOUT)
            // `None` clears the blocking client's default 30s total timeout.
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            bulk_data_url: bulk_data_url.into(),
            client,
        })
    }

    /// Look up the download URI for a bulk-data class.
    ///
    /// Returns [`DeckdexError::NotFound`] when the manifest has no entry of
    /// that type.
    pub fn bulk_data_uri(&self, data_type: &str) -> Result<String> {
        info!("Fetching bulk data information from {}...", self.bulk_data_url);
        let manifest: BulkDataList = self.get_json(&self.bulk_data_url)?;

        let item = manifest
            .data
            .into_iter()
            .find(|item| item.type_field == data_type)
            .ok_or_else(|| {
                DeckdexError::NotFound(format!("Could not find '{}' bulk data", data_type))
            })?;

        info!("Found {} bulk data: {}", data_type, item.download_uri);
        Ok(item.download_uri)
    }

    /// Download and parse the full card array at `uri`.
    pub fn download_cards(&self, uri: &str) -> Result<Vec<ScryfallCard>> {
        info!("Downloading bulk data from {}...", uri);
        let cards: Vec<ScryfallCard> = self.get_json(uri)?;
        info!("Downloaded {} cards.", cards.len());
        Ok(cards)
    }

    /// GET `url`, fail on a non-success status, and parse the body as JSON.
    ///
    /// The body is read fully before parsing so malformed JSON surfaces as
    /// [`DeckdexError::Parse`] rather than a transport error.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
