use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use deckdex::{CardFilter, NormalizedCard, Pagination};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListCardsParams {
    pub name: Option<String>,
    pub set_code: Option<String>,
    pub type_line: Option<String>,
    pub color: Option<String>,
    pub rarity: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct SearchCardsParams {
    pub limit: Option<i64>,
}

/// Treat `?name=` the same as an absent parameter.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /cards?name=bolt&set_code=lea&type_line=instant&color=R&rarity=common&limit=20&offset=0
///
/// `color` is applied to the fetched page, after the database query.
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListCardsParams>, QueryRejection>,
) -> Result<Json<Vec<NormalizedCard>>, AppError> {
    let Query(params) = params?;
    let page = Pagination::new(params.limit, params.offset)?;
    let filter = CardFilter {
        name: non_empty(params.name),
        set_code: non_empty(params.set_code),
        type_line: non_empty(params.type_line),
        color: non_empty(params.color),
        rarity: non_empty(params.rarity),
        page,
    };

    let cards = state.dex.run(move |d| d.cards().list(&filter)).await?;
    Ok(Json(cards))
}

/// GET /cards/{id}
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> Result<Json<NormalizedCard>, AppError> {
    let card = state.dex.run(move |d| d.cards().get(&card_id)).await?;

    match card {
        Some(card) => Ok(Json(card)),
        None => Err(AppError::not_found("Card not found")),
    }
}

/// GET /cards/search/{query}?limit=20
///
/// Case-insensitive match on name, type line or oracle text.
pub async fn search_cards(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
    params: Result<Query<SearchCardsParams>, QueryRejection>,
) -> Result<Json<Vec<NormalizedCard>>, AppError> {
    let Query(params) = params?;
    let page = Pagination::limit_only(params.limit)?;
    let cards = state
        .dex
        .run(move |d| d.cards().search(&query, page.limit))
        .await?;
    Ok(Json(cards))
}
