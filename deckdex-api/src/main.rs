use std::process::ExitCode;
use std::sync::Arc;

use deckdex::{AsyncDeckdex, Settings};
use deckdex_api::{app, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = deckdex::logging::init_tracing("info") {
        eprintln!("failed to initialize logging: {e}");
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Opening database {}", settings.database_path.display());
    let dex = match AsyncDeckdex::builder()
        .settings(&settings)
        .init_schema(true)
        .build()
        .await
    {
        Ok(dex) => dex,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = app(Arc::new(AppState::new(dex)));

    let addr = settings.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("DeckDex API listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
