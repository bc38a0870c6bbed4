//! Domain model for stored quotations.
//!
//! # Invariants
//! - Every quote is identified by a store-assigned `QuoteId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod quote;
