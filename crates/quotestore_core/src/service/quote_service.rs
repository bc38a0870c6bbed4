//! Quote store use-case service.
//!
//! # Responsibility
//! - Provide the caller-facing create/get/soft-delete entry points.
//! - Turn missing rows into `RepoError::NotFound`.
//! - Emit metadata-only diagnostic events (never quote text).
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Use-case facade over a quote repository.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new active quote and returns it with its assigned id.
    ///
    /// # Errors
    /// - `Validation` when `text` is empty; no row is created.
    /// - `ConstraintViolation` when storage rejects the row.
    pub fn create(
        &self,
        text: impl Into<String>,
        attributed_name: Option<String>,
        attributed_date: Option<NaiveDate>,
    ) -> RepoResult<Quote> {
        let request = NewQuote {
            text: text.into(),
            attributed_name,
            attributed_date,
        };
        self.create_from(&request)
    }

    /// Stores a prepared insert request.
    pub fn create_from(&self, request: &NewQuote) -> RepoResult<Quote> {
        match self.repo.create_quote(request) {
            Ok(quote) => {
                info!(
                    "event=quote_create module=service status=ok qid={} attributed={}",
                    quote.id,
                    quote.attributed_name.is_some()
                );
                Ok(quote)
            }
            Err(err) => {
                warn!("event=quote_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Loads one quote whether or not it has been soft-deleted.
    pub fn get(&self, id: QuoteId) -> RepoResult<Quote> {
        self.repo
            .get_quote(id, true)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Loads one quote, treating tombstoned rows as missing.
    pub fn get_active(&self, id: QuoteId) -> RepoResult<Quote> {
        self.repo
            .get_quote(id, false)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Flags one quote as deleted. The row and its fields are kept.
    pub fn soft_delete(&self, id: QuoteId) -> RepoResult<()> {
        match self.repo.soft_delete_quote(id) {
            Ok(()) => {
                info!("event=quote_soft_delete module=service status=ok qid={id}");
                Ok(())
            }
            Err(RepoError::NotFound(missing)) => {
                debug!("event=quote_soft_delete module=service status=not_found qid={missing}");
                Err(RepoError::NotFound(missing))
            }
            Err(err) => {
                warn!("event=quote_soft_delete module=service status=error qid={id} error={err}");
                Err(err)
            }
        }
    }

    /// Counts stored quotes, optionally including tombstones.
    pub fn count(&self, include_deleted: bool) -> RepoResult<u64> {
        self.repo.count_quotes(include_deleted)
    }
}
