//! Unit tests for SELECT construction and identifier quoting.

use deckdex::sql_builder::{quote_ident, quote_table, Order, SqlBuilder};
use deckdex::DeckdexError;

fn cards() -> SqlBuilder {
    SqlBuilder::from_table("mtg_card").unwrap()
}

// ---------------------------------------------------------------------------
// Quoting
// ---------------------------------------------------------------------------

#[test]
fn quote_table_accepts_plain_identifiers() {
    assert_eq!(quote_table("mtg_card").unwrap(), "\"mtg_card\"");
    assert_eq!(quote_table("_staging2").unwrap(), "\"_staging2\"");
}

#[test]
fn quote_table_rejects_anything_else() {
    for name in ["", "2cards", "mtg card", "cards; DROP TABLE deck", "a\"b", "main.mtg_card"] {
        let err = quote_table(name).unwrap_err();
        assert!(matches!(err, DeckdexError::InvalidArgument(_)), "{:?}", name);
    }
    assert!(SqlBuilder::from_table("deck; --").is_err());
}

#[test]
fn quote_ident_doubles_embedded_quotes() {
    assert_eq!(quote_ident("set"), "\"set\"");
    assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn bare_builder_selects_everything() {
    let (sql, params) = cards().build();
    assert_eq!(sql, "SELECT * FROM \"mtg_card\"");
    assert!(params.is_empty());
}

#[test]
fn eq_quotes_keyword_columns() {
    let (sql, params) = cards().eq("set", "lea").build();
    assert_eq!(sql, "SELECT * FROM \"mtg_card\" WHERE \"set\" = ?");
    assert_eq!(params, vec!["lea"]);
}

#[test]
fn contains_wraps_needle_in_wildcards() {
    let (sql, params) = cards().contains("name", "Bolt").build();
    assert!(sql.ends_with("WHERE LOWER(\"name\") LIKE LOWER(?)"));
    assert_eq!(params, vec!["%Bolt%"]);
}

#[test]
fn contains_any_binds_needle_per_column() {
    let (sql, params) = cards()
        .contains_any(&["name", "type_line", "oracle_text"], "angel")
        .build();
    assert!(sql.contains(
        "(LOWER(\"name\") LIKE LOWER(?) OR LOWER(\"type_line\") LIKE LOWER(?) OR LOWER(\"oracle_text\") LIKE LOWER(?))"
    ));
    assert_eq!(params, vec!["%angel%", "%angel%", "%angel%"]);
}

#[test]
fn contains_any_without_columns_is_noop() {
    let (sql, params) = cards().contains_any(&[], "x").build();
    assert!(!sql.contains("WHERE"));
    assert!(params.is_empty());
}

#[test]
fn filters_are_joined_with_and_in_call_order() {
    let (sql, params) = cards()
        .eq("rarity", "uncommon")
        .contains("type_line", "instant")
        .build();
    assert!(sql.contains("WHERE \"rarity\" = ? AND LOWER(\"type_line\") LIKE LOWER(?)"));
    assert_eq!(params, vec!["uncommon", "%instant%"]);
}

// ---------------------------------------------------------------------------
// Projection, ordering, paging
// ---------------------------------------------------------------------------

#[test]
fn count_replaces_projection() {
    let (sql, _) = cards().count().limit(1).build();
    assert_eq!(sql, "SELECT COUNT(*) FROM \"mtg_card\" LIMIT 1");
}

#[test]
fn order_keys_keep_call_order() {
    let (sql, _) = SqlBuilder::from_table("deck")
        .unwrap()
        .order("created_at", Order::Desc)
        .order("id", Order::Asc)
        .build();
    assert!(sql.ends_with("ORDER BY \"created_at\" DESC, \"id\" ASC"));
}

#[test]
fn card_listing_query_shape() {
    let (sql, params) = cards()
        .contains("name", "angel")
        .eq("rarity", "uncommon")
        .order("name", Order::Asc)
        .order("id", Order::Asc)
        .limit(20)
        .offset(40)
        .build();

    assert_eq!(
        sql,
        "SELECT * FROM \"mtg_card\" \
         WHERE LOWER(\"name\") LIKE LOWER(?) AND \"rarity\" = ? \
         ORDER BY \"name\" ASC, \"id\" ASC LIMIT 20 OFFSET 40"
    );
    assert_eq!(params, vec!["%angel%", "uncommon"]);
}
