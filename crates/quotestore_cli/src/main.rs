//! Quote store smoke probe.
//!
//! # Responsibility
//! - Open the store described by `QUOTESTORE_*` environment variables.
//! - Print schema version and row counts for quick local sanity checks.

use quotestore_core::db::migrations::current_version;
use quotestore_core::{core_version, QuoteService, QuoteStoreConfig, SqliteQuoteRepository};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=probe module=cli status=error error={err}");
            eprintln!("quotestore probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = QuoteStoreConfig::from_env()?;
    config.init_logging()?;

    let conn = config.open_connection()?;
    let schema_version = current_version(&conn)?;
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn)?);

    let total = service.count(true)?;
    let active = service.count(false)?;

    println!("quotestore_core version={}", core_version());
    match &config.database_path {
        Some(path) => println!("database={}", path.display()),
        None => println!("database=:memory:"),
    }
    println!("schema_version={schema_version}");
    println!("quotes total={total} active={active}");
    Ok(())
}
