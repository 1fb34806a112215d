use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// NormalizedCard: the stored projection of a Scryfall card
// ---------------------------------------------------------------------------

/// The reduced, application-owned shape of a card.
///
/// Produced once per raw record by [`process_card`](crate::transform::process_card),
/// written to the `mtg_card` table, and read back as-is by the card queries.
/// `colors`, `color_identity` and `legalities` are always materialized (empty
/// rather than null), both when built from Scryfall data and when decoded from
/// the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCard {
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
    pub image_uri: Option<String>,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub price_usd_foil: Option<String>,
    #[serde(default, deserialize_with = "json_text")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "json_text")]
    pub color_identity: Vec<String>,
    #[serde(default, deserialize_with = "json_text")]
    pub legalities: BTreeMap<String, String>,
}

impl NormalizedCard {
    /// Case-insensitive substring match against any entry of `colors`.
    ///
    /// Cards without colors never match.
    pub fn has_color(&self, color: &str) -> bool {
        let needle = color.to_lowercase();
        self.colors
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
    }
}

/// Decode a column that may arrive either as a native JSON value or as JSON
/// text (DuckDB hands VARCHAR columns back as strings). Null decodes to the
/// type's default.
fn json_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::String(text) if text.trim().is_empty() => Ok(T::default()),
        serde_json::Value::String(text) => {
            serde_json::from_str(&text).map_err(serde::de::Error::custom)
        }
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}
