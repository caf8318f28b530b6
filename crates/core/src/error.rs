//! Error types for the persistence boundary.
//!
//! Ordinary business-rule failures never surface as Rust errors; they are
//! reported through `ImportSummary` values. The variants here cover the only
//! genuinely fatal conditions the core can hit: failures of the external
//! stores it commits to.

/// Errors surfaced by the external stores the import flow talks to.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the batch: {0}")]
    Rejected(String),
    #[error("store backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
