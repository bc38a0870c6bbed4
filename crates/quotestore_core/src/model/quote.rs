//! Quote domain model.
//!
//! # Responsibility
//! - Define the persisted quote record and the request used to create one.
//! - Validate caller input before it reaches storage.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another quote.
//! - `deleted` is the source of truth for tombstone state.
//! - `text` is never empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned quote identifier (`quotes.qid`).
pub type QuoteId = i64;

/// Persisted quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    /// Who said or wrote it, when known.
    pub attributed_name: Option<String>,
    /// When it was said or written, when known.
    pub attributed_date: Option<NaiveDate>,
    /// Soft delete tombstone. Tombstoned rows keep every other field.
    pub deleted: bool,
}

/// Lifecycle state derived from the tombstone flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    Active,
    Tombstoned,
}

impl Quote {
    /// Returns whether this quote has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    pub fn state(&self) -> QuoteState {
        if self.deleted {
            QuoteState::Tombstoned
        } else {
            QuoteState::Active
        }
    }

    /// Checks persisted-shape invariants.
    ///
    /// Used by read paths so corrupted rows surface as errors.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.id <= 0 {
            return Err(QuoteValidationError::NonPositiveId(self.id));
        }
        validate_text(&self.text)
    }
}

/// Insert request for a new quote.
///
/// The store assigns `id` and starts every quote as active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub text: String,
    pub attributed_name: Option<String>,
    pub attributed_date: Option<NaiveDate>,
}

impl NewQuote {
    /// Creates an unattributed quote request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributed_name: None,
            attributed_date: None,
        }
    }

    pub fn with_attribution_name(mut self, name: impl Into<String>) -> Self {
        self.attributed_name = Some(name.into());
        self
    }

    pub fn with_attribution_date(mut self, date: NaiveDate) -> Self {
        self.attributed_date = Some(date);
        self
    }

    /// Rejects requests storage would refuse or that carry no quote at all.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        validate_text(&self.text)
    }
}

/// Validation failures for quote input and persisted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// Text has no characters; storage requires `length(quote) > 0`.
    EmptyText,
    /// Identifier outside the range storage assigns.
    NonPositiveId(QuoteId),
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
            Self::NonPositiveId(id) => write!(f, "quote id must be positive, got {id}"),
        }
    }
}

impl Error for QuoteValidationError {}

fn validate_text(text: &str) -> Result<(), QuoteValidationError> {
    if text.is_empty() {
        return Err(QuoteValidationError::EmptyText);
    }
    Ok(())
}
