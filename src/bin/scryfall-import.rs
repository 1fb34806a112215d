//! One-shot Scryfall bulk import into the `mtg_card` table.
//!
//! Takes no flags. The database location and manifest URL come from the
//! environment (see [`deckdex::Settings`]).

use std::process::ExitCode;

use deckdex::{Deckdex, Settings};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    if let Err(e) = deckdex::logging::init_tracing("info") {
        eprintln!("failed to initialize logging: {e}");
    }

    info!("Starting Scryfall bulk data import...");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using database {}", settings.database_path.display());

    let dex = match Deckdex::builder().settings(&settings).build() {
        Ok(dex) => dex,
        Err(e) => {
            error!("Could not open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut importer = dex.importer();
    match importer.run() {
        Ok(summary) => {
            if summary.failed_batches() > 0 {
                warn!(
                    "{} batches failed; {} cards were not stored",
                    summary.failed_batches(),
                    summary.dropped()
                );
            }
            info!("Import completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import {}: {}", importer.stage(), e);
            ExitCode::FAILURE
        }
    }
}
