//! Core use-case services.
//!
//! Keeps callers decoupled from storage details.

pub mod quote_service;
