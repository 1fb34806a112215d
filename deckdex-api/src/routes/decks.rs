use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use deckdex::{Deck, NewDeck};

use crate::error::AppError;
use crate::state::AppState;

/// POST /decks
///
/// Body: `{"name": "...", "format": "...", "description": "..."}` (description optional).
pub async fn create_deck(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewDeck>, JsonRejection>,
) -> Result<Json<Deck>, AppError> {
    let Json(deck) = body?;
    let created = state.dex.run(move |d| d.decks().create(&deck)).await?;
    tracing::info!(deck_id = %created.id, "created deck");
    Ok(Json(created))
}

/// GET /decks
pub async fn list_decks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Deck>>, AppError> {
    let decks = state.dex.run(|d| d.decks().list()).await?;
    Ok(Json(decks))
}

/// GET /decks/{id}
pub async fn get_deck(
    State(state): State<Arc<AppState>>,
    Path(deck_id): Path<String>,
) -> Result<Json<Deck>, AppError> {
    let deck = state.dex.run(move |d| d.decks().get(&deck_id)).await?;

    match deck {
        Some(deck) => Ok(Json(deck)),
        None => Err(AppError::not_found("Deck not found")),
    }
}
