//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a catalog file and print per-entity counts.
//! - Optionally run a title search and print matching publications.
//!
//! Usage: `homelib_cli [DB_PATH] [TITLE_FILTER]`
//!
//! `DB_PATH` falls back to `HOMELIB_DB`, then `library.db`. Logging is enabled
//! when `HOMELIB_LOG_DIR` is set; `HOMELIB_LOG_LEVEL` overrides the level.

use homelib_core::db::DEFAULT_DB_FILE_NAME;
use homelib_core::{
    default_log_level, init_logging, Catalog, LoggingOptions, PublicationKind, PublicationQuery,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("homelib_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let db_path = args
        .next()
        .or_else(|| std::env::var("HOMELIB_DB").ok())
        .unwrap_or_else(|| DEFAULT_DB_FILE_NAME.to_string());
    let title_filter = args.next();

    if let Ok(log_dir) = std::env::var("HOMELIB_LOG_DIR") {
        let level = std::env::var("HOMELIB_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        let mut options = LoggingOptions::new(level, log_dir);
        options.echo_warnings = true;
        init_logging(&options)?;
    }

    let mut catalog = Catalog::open(&db_path)?;
    println!("homelib_core version={}", homelib_core::core_version());
    println!("catalog={db_path}");
    println!("authors={}", catalog.authors()?.count()?);
    println!("genres={}", catalog.genres()?.count()?);
    println!("publication_types={}", catalog.publication_types()?.count()?);
    println!("storage_locations={}", catalog.storage_locations()?.count()?);
    println!("publications={}", catalog.publications()?.count()?);

    if let Some(title) = title_filter {
        for publication in catalog.search(&PublicationQuery::by_title(title))? {
            let kind = match publication.kind {
                PublicationKind::Book => "book",
                PublicationKind::Periodical => "periodical",
            };
            let year = publication
                .year
                .map_or_else(|| "-".to_string(), |year| year.to_string());
            let location = publication
                .storage_location
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                publication.title,
                kind,
                publication.author_names().join(", "),
                publication.genre_names().join(", "),
                year,
                location
            );
        }
    }

    Ok(())
}
