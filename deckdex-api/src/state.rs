/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Owns the database connection. Blocking calls are dispatched to the
    /// tokio blocking pool internally.
    pub dex: deckdex::AsyncDeckdex,
}

impl AppState {
    pub fn new(dex: deckdex::AsyncDeckdex) -> Self {
        Self { dex }
    }
}
