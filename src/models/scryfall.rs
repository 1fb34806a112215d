use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bulk data manifest
// ---------------------------------------------------------------------------

/// Response body of the Scryfall `bulk-data` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDataList {
    pub data: Vec<BulkDataItem>,
}

/// One downloadable snapshot listed in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDataItem {
    #[serde(rename = "type")]
    pub type_field: String,
    pub download_uri: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

// ---------------------------------------------------------------------------
// ScryfallCard: raw catalog record (only the fields DeckDex reads)
// ---------------------------------------------------------------------------

/// A card object as published in Scryfall bulk data.
///
/// Everything except `id` and `name` is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
    #[serde(default)]
    pub image_uris: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub prices: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_identity: Option<Vec<String>>,
    #[serde(default)]
    pub legalities: Option<BTreeMap<String, String>>,
}

/// One face of a multi-faced card (transform, modal DFC, flip, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_uris: Option<BTreeMap<String, String>>,
}
