//! SELECT construction for the card and deck tables.
//!
//! The table name is validated once, column names are always double-quoted
//! (`set` is a DuckDB keyword), and every value is bound through a `?`
//! placeholder.
//!
//! ```rust
//! use deckdex::sql_builder::{Order, SqlBuilder};
//!
//! let (sql, params) = SqlBuilder::from_table("mtg_card")
//!     .unwrap()
//!     .contains("name", "bolt")
//!     .eq("rarity", "common")
//!     .order("name", Order::Asc)
//!     .limit(10)
//!     .build();
//! assert_eq!(params, vec!["%bolt%", "common"]);
//! ```

use crate::error::{DeckdexError, Result};

/// Quote a table name after checking it is a plain identifier.
///
/// Table names are the only SQL fragments not bound as parameters, so anything
/// beyond `[A-Za-z_][A-Za-z0-9_]*` is rejected.
pub fn quote_table(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(DeckdexError::InvalidArgument(format!(
            "Invalid table name: {:?}",
            name
        )));
    }
    Ok(format!("\"{}\"", name))
}

/// Double-quote a column name, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

pub struct SqlBuilder {
    table: String,
    count: bool,
    filters: Vec<String>,
    params: Vec<String>,
    order: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl SqlBuilder {
    /// Start a `SELECT *` over `table`. Fails for names that are not plain identifiers.
    pub fn from_table(table: &str) -> Result<Self> {
        Ok(Self {
            table: quote_table(table)?,
            count: false,
            filters: Vec::new(),
            params: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        })
    }

    /// Select `COUNT(*)` instead of every column.
    pub fn count(&mut self) -> &mut Self {
        self.count = true;
        self
    }

    /// `"column" = ?`
    pub fn eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.filters.push(format!("{} = ?", quote_ident(column)));
        self.params.push(value.to_string());
        self
    }

    /// Case-insensitive substring match on one column.
    pub fn contains(&mut self, column: &str, needle: &str) -> &mut Self {
        self.contains_any(&[column], needle)
    }

    /// Case-insensitive substring match on at least one of `columns`.
    ///
    /// The needle is bound once per column. An empty column list adds nothing.
    pub fn contains_any(&mut self, columns: &[&str], needle: &str) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let pattern = format!("%{}%", needle);
        let parts: Vec<String> = columns
            .iter()
            .map(|c| format!("LOWER({}) LIKE LOWER(?)", quote_ident(c)))
            .collect();
        self.params
            .extend(std::iter::repeat(pattern).take(columns.len()));
        self.filters.push(if parts.len() == 1 {
            parts.concat()
        } else {
            format!("({})", parts.join(" OR "))
        });
        self
    }

    /// Append a sort key; keys apply in the order they were added.
    pub fn order(&mut self, column: &str, order: Order) -> &mut Self {
        let dir = match order {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        };
        self.order.push(format!("{} {}", quote_ident(column), dir));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// The SQL text and its bind values, in placeholder order.
    pub fn build(&self) -> (String, Vec<String>) {
        let projection = if self.count { "COUNT(*)" } else { "*" };
        let mut sql = format!("SELECT {} FROM {}", projection, self.table);

        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.filters.join(" AND "));
        }
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        if let Some(n) = self.offset {
            sql.push_str(&format!(" OFFSET {}", n));
        }

        (sql, self.params.clone())
    }
}
