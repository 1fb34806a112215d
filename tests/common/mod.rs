//! Shared test fixtures for the DeckDex integration tests.
//!
//! - `setup_sample_db()` returns an in-memory DuckDB connection with the schema
//!   created and a handful of sample cards stored.
//! - `FixtureServer` is a tiny local HTTP server that stands in for the
//!   Scryfall catalog.

#![allow(dead_code)]

use deckdex::config::CARDS_TABLE;
use deckdex::{Connection, NormalizedCard};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Create an in-memory `Connection` with the schema and five sample cards.
pub fn setup_sample_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.ensure_schema().unwrap();
    conn.upsert_cards(CARDS_TABLE, &sample_cards()).unwrap();
    conn
}

/// Five cards across two sets; ordered by name they are
/// Counterspell, Fire // Ice, Lightning Bolt, Serra Angel, Sol Ring.
pub fn sample_cards() -> Vec<NormalizedCard> {
    vec![
        NormalizedCard {
            oracle_text: Some("Lightning Bolt deals 3 damage to any target.".into()),
            legalities: BTreeMap::from([
                ("modern".to_string(), "legal".to_string()),
                ("vintage".to_string(), "restricted".to_string()),
            ]),
            price_usd: Some("1.25".into()),
            ..card("card-001", "Lightning Bolt", "lea", "Instant", "common", &["R"])
        },
        NormalizedCard {
            oracle_text: Some("Counter target spell.".into()),
            ..card("card-002", "Counterspell", "lea", "Instant", "uncommon", &["U"])
        },
        card(
            "card-003",
            "Fire // Ice",
            "mh2",
            "Instant // Instant",
            "uncommon",
            &["R", "U"],
        ),
        NormalizedCard {
            oracle_text: Some("{T}: Add {C}{C}.".into()),
            ..card("card-004", "Sol Ring", "lea", "Artifact", "uncommon", &[])
        },
        NormalizedCard {
            oracle_text: Some("Flying, vigilance".into()),
            ..card(
                "card-005",
                "Serra Angel",
                "lea",
                "Creature \u{2014} Angel",
                "uncommon",
                &["W"],
            )
        },
    ]
}

/// A card with the commonly-filtered fields set and everything else empty.
pub fn card(
    id: &str,
    name: &str,
    set: &str,
    type_line: &str,
    rarity: &str,
    colors: &[&str],
) -> NormalizedCard {
    NormalizedCard {
        id: id.to_string(),
        name: name.to_string(),
        set: Some(set.to_string()),
        set_name: None,
        mana_cost: None,
        cmc: None,
        type_line: Some(type_line.to_string()),
        oracle_text: None,
        rarity: Some(rarity.to_string()),
        image_uri: None,
        scryfall_uri: None,
        price_usd: None,
        price_usd_foil: None,
        colors: colors.iter().map(|c| c.to_string()).collect(),
        color_identity: colors.iter().map(|c| c.to_string()).collect(),
        legalities: BTreeMap::new(),
    }
}

/// `n` minimal cards with ids `gen-00000`, `gen-00001`, ...
pub fn generated_cards(n: usize) -> Vec<NormalizedCard> {
    (0..n)
        .map(|i| card(&format!("gen-{:05}", i), &format!("Card {}", i), "tst", "Instant", "common", &[]))
        .collect()
}

// ---------------------------------------------------------------------------
// FixtureServer
// ---------------------------------------------------------------------------

/// One canned response: request path, status code, JSON body.
pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: String,
    /// Pause between sending the headers and the body.
    pub stall: Duration,
}

impl Route {
    pub fn ok(path: &str, body: impl Into<String>) -> Self {
        Self::status(path, 200, body)
    }

    pub fn status(path: &str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: body.into(),
            stall: Duration::ZERO,
        }
    }

    /// A 200 whose body arrives `stall` after the headers.
    pub fn slow(path: &str, body: impl Into<String>, stall: Duration) -> Self {
        Self {
            stall,
            ..Self::ok(path, body)
        }
    }
}

/// Serves canned responses on `127.0.0.1:<random port>` from a background
/// thread. Unknown paths get a 404. The thread lives for the rest of the test
/// process.
pub struct FixtureServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    /// Start a server. `routes` receives the base URL so bodies can link back
    /// to the server itself (e.g. a manifest pointing at a download path).
    pub fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Vec<Route>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes = routes(&base_url);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                // Drain headers up to the blank line.
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) if line == "\r\n" || line == "\n" => break,
                        Ok(_) => continue,
                        Err(_) => break,
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body, stall) = routes
                    .iter()
                    .find(|r| r.path == path)
                    .map(|r| (r.status, r.body.as_str(), r.stall))
                    .unwrap_or((404, "{\"object\":\"error\"}", Duration::ZERO));

                let head = format!(
                    "HTTP/1.1 {} Fixture\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len(),
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.flush();
                if !stall.is_zero() {
                    thread::sleep(stall);
                }
                let _ = stream.write_all(body.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A manifest listing `default_cards` (at `/default-cards.json`) and
/// `oracle_cards` (at `/oracle-cards.json`) on the given server.
pub fn manifest_json(base_url: &str) -> String {
    serde_json::json!({
        "object": "list",
        "has_more": false,
        "data": [
            {
                "object": "bulk_data",
                "type": "oracle_cards",
                "name": "Oracle Cards",
                "download_uri": format!("{}/oracle-cards.json", base_url),
                "size": 1024
            },
            {
                "object": "bulk_data",
                "type": "default_cards",
                "name": "Default Cards",
                "download_uri": format!("{}/default-cards.json", base_url),
                "updated_at": "2024-01-01T09:00:00.000+00:00",
                "size": 2048
            }
        ]
    })
    .to_string()
}

/// A small bulk file: a plain card, a double-faced card, and a sparse record.
pub fn bulk_cards_json() -> String {
    serde_json::json!([
        {
            "object": "card",
            "id": "0000579f-7b35-4ed3-b44c-db2a538066fe",
            "name": "Fury Sliver",
            "set": "tsp",
            "set_name": "Time Spiral",
            "mana_cost": "{5}{R}",
            "cmc": 6.0,
            "type_line": "Creature \u{2014} Sliver",
            "oracle_text": "All Sliver creatures have double strike.",
            "rarity": "uncommon",
            "scryfall_uri": "https://scryfall.com/card/tsp/157/fury-sliver",
            "image_uris": {
                "small": "https://cards.scryfall.io/small/front/f.jpg",
                "normal": "https://cards.scryfall.io/normal/front/f.jpg"
            },
            "colors": ["R"],
            "color_identity": ["R"],
            "legalities": {"legacy": "legal", "standard": "not_legal"},
            "prices": {"usd": "0.29", "usd_foil": "1.19", "eur": null}
        },
        {
            "object": "card",
            "id": "0001e0d0-2dcd-4640-b6ae-4e8bb3f1ad8b",
            "name": "Delver of Secrets // Insectile Aberration",
            "set": "isd",
            "type_line": "Creature \u{2014} Human Wizard // Creature \u{2014} Human Insect",
            "rarity": "common",
            "card_faces": [
                {"name": "Delver of Secrets", "image_uris": {"normal": "https://cards.scryfall.io/normal/front/d.jpg"}},
                {"name": "Insectile Aberration", "image_uris": {"normal": "https://cards.scryfall.io/normal/back/d.jpg"}}
            ],
            "color_identity": ["U"],
            "prices": {"usd": "0.45", "usd_foil": null}
        },
        {
            "object": "card",
            "id": "00020b05-ecb9-4603-8cc1-8cfa7a14befc",
            "name": "Sparse Token"
        }
    ])
    .to_string()
}
