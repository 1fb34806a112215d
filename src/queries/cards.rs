//! Card queries against the `mtg_card` table.

use crate::config::CARDS_TABLE;
use crate::connection::Connection;
use crate::error::{DeckdexError, Result};
use crate::models::NormalizedCard;
use crate::sql_builder::{Order, SqlBuilder};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A validated `limit`/`offset` pair.
///
/// Construct it before touching the database; out-of-range values are
/// rejected with [`DeckdexError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT as usize,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Validate raw query values. `None` falls back to limit 20 / offset 0.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(DeckdexError::InvalidArgument(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, limit
            )));
        }
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(DeckdexError::InvalidArgument(format!(
                "offset must be greater than or equal to 0, got {}",
                offset
            )));
        }
        Ok(Self {
            limit: limit as usize,
            offset: offset as usize,
        })
    }

    /// Validate a bare limit (offset fixed at 0).
    pub fn limit_only(limit: Option<i64>) -> Result<Self> {
        Self::new(limit, None)
    }
}

// ---------------------------------------------------------------------------
// CardFilter
// ---------------------------------------------------------------------------

/// Filters for [`CardQuery::list`]. `None` skips the filter.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    /// Case-insensitive substring of the card name.
    pub name: Option<String>,
    /// Exact set code.
    pub set_code: Option<String>,
    /// Case-insensitive substring of the type line.
    pub type_line: Option<String>,
    /// Applied after the query: keeps cards whose `colors` contain this value.
    pub color: Option<String>,
    /// Exact rarity.
    pub rarity: Option<String>,
    pub page: Pagination,
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for cards stored by the importer.
pub struct CardQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List cards matching `filter`, ordered by name then id.
    ///
    /// The color filter runs on the fetched page, so a page can come back
    /// shorter than `limit` even when more matching cards exist.
    pub fn list(&self, filter: &CardFilter) -> Result<Vec<NormalizedCard>> {
        let mut qb = SqlBuilder::from_table(CARDS_TABLE)?;

        if let Some(ref name) = filter.name {
            qb.contains("name", name);
        }
        if let Some(ref set_code) = filter.set_code {
            qb.eq("set", set_code);
        }
        if let Some(ref type_line) = filter.type_line {
            qb.contains("type_line", type_line);
        }
        if let Some(ref rarity) = filter.rarity {
            qb.eq("rarity", rarity);
        }

        qb.order("name", Order::Asc)
            .order("id", Order::Asc)
            .limit(filter.page.limit)
            .offset(filter.page.offset);

        let (sql, params) = qb.build();
        let cards: Vec<NormalizedCard> = self.conn.execute_into(&sql, &params)?;

        Ok(match filter.color.as_deref() {
            Some(color) if !color.is_empty() => {
                cards.into_iter().filter(|c| c.has_color(color)).collect()
            }
            _ => cards,
        })
    }

    /// Retrieve a single card by id.
    pub fn get(&self, id: &str) -> Result<Option<NormalizedCard>> {
        let (sql, params) = SqlBuilder::from_table(CARDS_TABLE)?
            .eq("id", id)
            .limit(1)
            .build();

        let cards: Vec<NormalizedCard> = self.conn.execute_into(&sql, &params)?;
        Ok(cards.into_iter().next())
    }

    /// Cards whose name, type line or oracle text contains `query`
    /// (case-insensitive).
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<NormalizedCard>> {
        let (sql, params) = SqlBuilder::from_table(CARDS_TABLE)?
            .contains_any(&["name", "type_line", "oracle_text"], query)
            .order("name", Order::Asc)
            .order("id", Order::Asc)
            .limit(limit)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Total number of stored cards.
    pub fn count(&self) -> Result<i64> {
        let (sql, params) = SqlBuilder::from_table(CARDS_TABLE)?.count().build();
        let cnt = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(cnt)
    }
}
