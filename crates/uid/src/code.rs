//! Internal implementation of the identifier code type.

use crate::{UidError, UidResult};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Letters allowed anywhere in a code. `I`, `l` and `O` are excluded because
/// they are easily confused with `1` and `0` when codes are read aloud or
/// transcribed from paper forms.
const LETTERS: &[u8] = b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Characters allowed after the first position: the letter set plus digits.
const ALPHANUMERIC: &[u8] = b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ0123456789";

/// Fixed length of every identifier code.
pub const UID_LENGTH: usize = 11;

/// The tracker's canonical identifier code (11 characters, letter-first,
/// restricted alphabet).
///
/// This wrapper type guarantees that once constructed, the contained code is in
/// canonical form. It provides type safety for identifier operations across the
/// system.
///
/// # When to use this type
/// Use this wrapper whenever you are:
/// - Generating new identifiers for events or notes.
/// - Accepting an identifier string from *outside* the core (API payload,
///   client-supplied note identifier, etc).
///
/// # Construction
/// - [`Uid::generate`] produces a new random code (for new records).
/// - [`Uid::parse`] validates an externally supplied identifier.
///
/// # Errors
/// [`Uid::parse`] returns [`UidError::InvalidInput`] if the input is not
/// already canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Uid(String);

impl Uid {
    /// Generates a new identifier code in canonical form.
    ///
    /// The first character is always drawn from the letter subset, so a code
    /// never begins with a digit. The random source is the thread-local
    /// cryptographically secure generator, which makes accidental collisions
    /// across a large, long-lived identifier space vanishingly unlikely
    /// without any central sequence allocation.
    ///
    /// Generation cannot fail.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut code = String::with_capacity(UID_LENGTH);

        code.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
        for _ in 1..UID_LENGTH {
            code.push(ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char);
        }

        Self(code)
    }

    /// Validates and wraps an identifier string that must already be in
    /// canonical form.
    ///
    /// This does **not** normalise the input in any way. Callers must provide
    /// the canonical representation.
    ///
    /// # Arguments
    ///
    /// * `input` - Identifier string to validate and wrap.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UidResult<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(UidError::InvalidInput(format!(
            "identifier must be {} characters from the restricted alphabet, starting with a letter, got: '{}'",
            UID_LENGTH, input
        )))
    }

    /// Returns true if `input` is a canonical identifier code.
    ///
    /// This is a purely syntactic check that validates:
    /// - Exactly 11 bytes long
    /// - First byte in the letter subset
    /// - Remaining bytes in the letter-or-digit subset
    pub fn is_valid(input: &str) -> bool {
        let bytes = input.as_bytes();
        if bytes.len() != UID_LENGTH {
            return false;
        }
        if !LETTERS.contains(&bytes[0]) {
            return false;
        }
        bytes[1..].iter().all(|b| ALPHANUMERIC.contains(b))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uid {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl serde::Serialize for Uid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uid::parse(&s).map_err(serde::de::Error::custom)
    }
}
