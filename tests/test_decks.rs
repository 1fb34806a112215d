//! Deck create/list/get tests.

mod common;

use deckdex::queries::DeckQuery;
use deckdex::NewDeck;

fn new_deck(name: &str, format: &str, description: Option<&str>) -> NewDeck {
    NewDeck {
        name: name.to_string(),
        format: format.to_string(),
        description: description.map(str::to_string),
    }
}

#[test]
fn create_assigns_id_and_timestamp() {
    let conn = common::setup_sample_db();
    let deck = DeckQuery::new(&conn)
        .create(&new_deck("Burn", "modern", Some("Bolt everything")))
        .unwrap();

    assert_eq!(deck.name, "Burn");
    assert_eq!(deck.format, "modern");
    assert_eq!(deck.description.as_deref(), Some("Bolt everything"));
    assert_eq!(deck.id.len(), 36);
    assert!(uuid::Uuid::parse_str(&deck.id).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(&deck.created_at).is_ok());
}

#[test]
fn create_then_get_round_trips() {
    let conn = common::setup_sample_db();
    let decks = DeckQuery::new(&conn);
    let created = decks.create(&new_deck("Tron", "modern", None)).unwrap();

    let fetched = decks.get(&created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert!(fetched.description.is_none());
}

#[test]
fn ids_are_unique() {
    let conn = common::setup_sample_db();
    let decks = DeckQuery::new(&conn);
    let a = decks.create(&new_deck("Same", "pauper", None)).unwrap();
    let b = decks.create(&new_deck("Same", "pauper", None)).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(decks.list().unwrap().len(), 2);
}

#[test]
fn list_is_newest_first() {
    let conn = common::setup_sample_db();
    let decks = DeckQuery::new(&conn);
    let first = decks.create(&new_deck("First", "legacy", None)).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = decks.create(&new_deck("Second", "legacy", None)).unwrap();

    let listed = decks.list().unwrap();
    let ids: Vec<&str> = listed.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn list_empty_table() {
    let conn = common::setup_sample_db();
    assert!(DeckQuery::new(&conn).list().unwrap().is_empty());
}

#[test]
fn get_unknown_id_is_none() {
    let conn = common::setup_sample_db();
    assert!(DeckQuery::new(&conn).get("missing").unwrap().is_none());
}
