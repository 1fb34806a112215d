use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Deck: a stored deck row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub format: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// NewDeck: create payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeck {
    pub name: String,
    pub format: String,
    #[serde(default)]
    pub description: Option<String>,
}
