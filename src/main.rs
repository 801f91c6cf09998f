//! Oxcatalog - library preview
//!
//! Loads the scanner's library cache named in the user settings, groups it
//! the way the library view would, and prints the result.

use std::sync::Arc;

use {
    anyhow::Result,
    tracing::{Level, info},
    tracing_subscriber::EnvFilter,
};

use oxcatalog::{
    AppState, Catalog, SettingsManager,
    error::{ErrorReporter, ResultExt},
    state::LoggingScheduler,
    ui::LibraryRow,
};

/// Main entry point for the library preview.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into())),
        )
        .init();

    run().inspect_err(|error| {
        ErrorReporter::error(error, "library preview");
        eprintln!("{}", ErrorReporter::to_user_message(error));
    })
}

fn run() -> Result<()> {
    let settings_manager = SettingsManager::new().add_context("Loading settings")?;
    let settings = settings_manager.get_settings().clone();
    settings.validate().add_context("Validating settings")?;

    let app_state = AppState::new(&settings)?;
    let cache_path = settings.library_cache_path();
    let catalog = Catalog::load_json(&cache_path, settings.limits(), settings.skip_invalid_records)?;
    app_state.set_catalog(catalog);

    let library = app_state.create_library_view(Arc::new(LoggingScheduler));
    info!(
        key = %app_state.grouping_key(),
        groups = library.headings().len(),
        "Library grouped"
    );

    for row in library.rows() {
        match row {
            LibraryRow::Heading(heading) => println!("\n{heading}"),
            LibraryRow::Track(track) => println!(
                "  {}{} | {} | {} | {} | {}",
                if track.now_playing { "> " } else { "" },
                track.title,
                track.display_artist(),
                track.display_album(),
                track.display_genre(),
                track.duration,
            ),
        }
    }

    Ok(())
}
