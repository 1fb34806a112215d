use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to DeckDex API" }))
}

/// GET /health
///
/// Always 200; `database` carries the error text when the card table
/// is unreachable.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = match state.dex.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => e.to_string(),
    };

    Json(json!({
        "status": "healthy",
        "database": database
    }))
}
