//! DuckDB connection wrapper: schema setup, query execution and batched card upserts.
//!
//! JSON-valued card columns (`colors`, `color_identity`, `legalities`) are stored
//! as JSON text and decoded back into native values by the model layer.

use crate::config::{CARDS_TABLE, DECKS_TABLE};
use crate::error::Result;
use crate::models::NormalizedCard;
use crate::sql_builder::{quote_ident, quote_table, SqlBuilder};
use duckdb::types::{Value as DuckValue, ValueRef};
use duckdb::Connection as DuckDbConnection;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Column order used for card upserts. Matches [`NormalizedCard`].
pub const CARD_COLUMNS: [&str; 16] = [
    "id",
    "name",
    "set",
    "set_name",
    "mana_cost",
    "cmc",
    "type_line",
    "oracle_text",
    "rarity",
    "image_uri",
    "scryfall_uri",
    "price_usd",
    "price_usd_foil",
    "colors",
    "color_identity",
    "legalities",
];

fn schema_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {cards} (\
           \"id\" VARCHAR PRIMARY KEY, \
           \"name\" VARCHAR NOT NULL, \
           \"set\" VARCHAR, \
           \"set_name\" VARCHAR, \
           \"mana_cost\" VARCHAR, \
           \"cmc\" DOUBLE, \
           \"type_line\" VARCHAR, \
           \"oracle_text\" VARCHAR, \
           \"rarity\" VARCHAR, \
           \"image_uri\" VARCHAR, \
           \"scryfall_uri\" VARCHAR, \
           \"price_usd\" VARCHAR, \
           \"price_usd_foil\" VARCHAR, \
           \"colors\" VARCHAR, \
           \"color_identity\" VARCHAR, \
           \"legalities\" VARCHAR\
         ); \
         CREATE TABLE IF NOT EXISTS {decks} (\
           \"id\" VARCHAR PRIMARY KEY, \
           \"name\" VARCHAR NOT NULL, \
           \"format\" VARCHAR NOT NULL, \
           \"description\" VARCHAR, \
           \"created_at\" VARCHAR NOT NULL\
         );",
        cards = CARDS_TABLE,
        decks = DECKS_TABLE,
    )
}

/// Owns the DuckDB database that backs both the API and the importer.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open (or create) a database file, creating parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = DuckDbConnection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the card and deck tables if they do not exist yet.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(&schema_sql())?;
        Ok(())
    }

    /// Trivial read against `table`; fails if the table is missing.
    pub fn check_table(&self, table: &str) -> Result<()> {
        let (sql, params) = SqlBuilder::from_table(table)?.count().limit(1).build();
        self.execute_scalar(&sql, &params)?;
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let (column_names, column_count) = match rows_result.as_ref() {
            Some(executed) => (
                executed
                    .column_names()
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>(),
                executed.column_count(),
            ),
            None => return Ok(Vec::new()),
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            let value = convert_value_ref(row.get_ref(0)?);
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Execute a write statement with typed, nullable parameters.
    ///
    /// Returns the number of affected rows.
    pub fn execute_values(&self, sql: &str, params: &[DuckValue]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let changed = stmt.execute(duckdb::params_from_iter(params.iter()))?;
        Ok(changed)
    }

    /// Insert-or-replace one batch of cards, keyed by `id`.
    ///
    /// The batch runs in its own transaction: either every card lands or the
    /// batch is rolled back and the error returned.
    pub fn upsert_cards(&self, table: &str, cards: &[NormalizedCard]) -> Result<usize> {
        if cards.is_empty() {
            return Ok(0);
        }

        let columns = CARD_COLUMNS
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; CARD_COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
            quote_table(table)?,
            columns,
            placeholders
        );

        self.conn.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize> {
            let mut stmt = self.conn.prepare(&sql)?;
            for card in cards {
                let values = card_values(card)?;
                stmt.execute(duckdb::params_from_iter(values.iter()))?;
            }
            Ok(cards.len())
        })();

        match result {
            Ok(count) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(count)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

/// Bind values for one card, in [`CARD_COLUMNS`] order.
fn card_values(card: &NormalizedCard) -> Result<Vec<DuckValue>> {
    let text = |v: &Option<String>| match v {
        Some(s) => DuckValue::Text(s.clone()),
        None => DuckValue::Null,
    };
    Ok(vec![
        DuckValue::Text(card.id.clone()),
        DuckValue::Text(card.name.clone()),
        text(&card.set),
        text(&card.set_name),
        text(&card.mana_cost),
        card.cmc.map(DuckValue::Double).unwrap_or(DuckValue::Null),
        text(&card.type_line),
        text(&card.oracle_text),
        text(&card.rarity),
        text(&card.image_uri),
        text(&card.scryfall_uri),
        text(&card.price_usd),
        text(&card.price_usd_foil),
        DuckValue::Text(serde_json::to_string(&card.colors)?),
        DuckValue::Text(serde_json::to_string(&card.color_identity)?),
        DuckValue::Text(serde_json::to_string(&card.legalities)?),
    ])
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; fall back to a string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // No column in the DeckDex schema uses the remaining types.
        _ => serde_json::Value::Null,
    }
}
