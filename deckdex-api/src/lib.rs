//! HTTP surface for DeckDex: card lookup/search and deck CRUD.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

pub use state::AppState;

/// Build the router with every route and a permissive CORS layer.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::meta::root))
        .route("/health", get(routes::meta::health))
        .route(
            "/decks",
            get(routes::decks::list_decks).post(routes::decks::create_deck),
        )
        .route("/decks/{id}", get(routes::decks::get_deck))
        .route("/cards", get(routes::cards::list_cards))
        .route("/cards/search/{query}", get(routes::cards::search_cards))
        .route("/cards/{id}", get(routes::cards::get_card))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
