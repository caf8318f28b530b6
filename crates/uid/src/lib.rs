//! Identifier codes for tracker entities.
//!
//! Every record the tracker stores (events and the notes attached to them) is
//! addressed by a short, fixed-length code rather than a database surrogate key.
//! Codes are generated locally, without any central sequence allocator, and are
//! expected to stay unique across the whole record population for the lifetime
//! of the system — identifiers are never reused, including for soft-deleted
//! records.
//!
//! This crate provides:
//! - A small wrapper type ([`Uid`]) that *guarantees* the canonical code shape
//!   once constructed.
//! - Generation of fresh codes from a cryptographically secure random source.
//! - Strict validation of externally supplied codes.
//!
//! ## Canonical code form
//! - Length: 11
//! - First character: a letter (never a digit)
//! - Characters: ASCII letters excluding the easily confused glyphs `I`, `l`
//!   and `O`, plus the digits `0-9`
//! - Example: `hQ3kxB71dWm`
//!
//! Notes:
//! - Canonical form is *required* for externally supplied identifiers. Use
//!   [`Uid::parse`] to validate an input string, or [`Uid::is_valid`] for a
//!   cheap syntactic pre-check.
//! - Non-canonical values (wrong length, digit-first, excluded glyphs) are
//!   rejected, never normalised.

mod code;

pub use code::Uid;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UidResult<T> = Result<T, UidError>;
