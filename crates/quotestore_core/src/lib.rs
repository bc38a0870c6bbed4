//! Core storage for quotations with optional attribution.
//! Quotes are soft-deleted via a tombstone flag and never physically removed.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, QuoteStoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{NewQuote, Quote, QuoteId, QuoteState, QuoteValidationError};
pub use repo::quote_repo::{QuoteRepository, RepoError, RepoResult, SqliteQuoteRepository};
pub use service::quote_service::QuoteService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
