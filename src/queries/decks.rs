//! Deck queries against the `deck` table.

use chrono::{SecondsFormat, Utc};
use duckdb::types::Value as DuckValue;
use uuid::Uuid;

use crate::config::DECKS_TABLE;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Deck, NewDeck};
use crate::sql_builder::{quote_table, Order, SqlBuilder};

// ---------------------------------------------------------------------------
// DeckQuery
// ---------------------------------------------------------------------------

/// Query interface for user decks.
pub struct DeckQuery<'a> {
    conn: &'a Connection,
}

impl<'a> DeckQuery<'a> {
    /// Create a new `DeckQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a deck with a fresh UUID and creation timestamp, returning the stored row.
    pub fn create(&self, deck: &NewDeck) -> Result<Deck> {
        let created = Deck {
            id: Uuid::new_v4().to_string(),
            name: deck.name.clone(),
            format: deck.format.clone(),
            description: deck.description.clone(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let sql = format!(
            "INSERT INTO {} (\"id\", \"name\", \"format\", \"description\", \"created_at\") \
             VALUES (?, ?, ?, ?, ?)",
            quote_table(DECKS_TABLE)?
        );
        self.conn.execute_values(
            &sql,
            &[
                DuckValue::Text(created.id.clone()),
                DuckValue::Text(created.name.clone()),
                DuckValue::Text(created.format.clone()),
                created
                    .description
                    .clone()
                    .map(DuckValue::Text)
                    .unwrap_or(DuckValue::Null),
                DuckValue::Text(created.created_at.clone()),
            ],
        )?;

        Ok(created)
    }

    /// All decks, newest first.
    pub fn list(&self) -> Result<Vec<Deck>> {
        let (sql, params) = SqlBuilder::from_table(DECKS_TABLE)?
            .order("created_at", Order::Desc)
            .order("id", Order::Asc)
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Retrieve a single deck by id.
    pub fn get(&self, id: &str) -> Result<Option<Deck>> {
        let (sql, params) = SqlBuilder::from_table(DECKS_TABLE)?
            .eq("id", id)
            .limit(1)
            .build();
        let decks: Vec<Deck> = self.conn.execute_into(&sql, &params)?;
        Ok(decks.into_iter().next())
    }
}
