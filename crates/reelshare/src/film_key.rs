//! `FilmKey` — validated textual identifier for a film.
//!
//! A film key is the stable join key across the catalog and every per-user
//! list store. Keys are created once when a film enters the catalog and are
//! immutable afterwards. Catalog-produced keys are lowercase slug-shaped
//! (`no-other-land-2024`), but keys arriving through a share link are
//! attacker-editable, so `parse` enforces the looser decode-side contract:
//!
//! - charset `[a-zA-Z0-9_-]`, nothing else
//! - length 3–200 bytes inclusive
//! - lowercased form contains none of the injection blocklist substrings
//!
//! The blocklist is a defense-in-depth substring filter, not a parser: its
//! only job is to reject obviously malicious identifiers that pass the
//! charset check (e.g. `1script1`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum film-key length in bytes.
pub const MIN_KEY_LEN: usize = 3;

/// Maximum film-key length in bytes.
pub const MAX_KEY_LEN: usize = 200;

/// Substrings (matched against the lowercased key) that reject a key
/// outright. Anything resembling an executable payload has no business in a
/// film identifier.
const BLOCKLIST: [&str; 3] = ["script", "eval", "function"];

/// Why a candidate film key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilmKeyError {
    /// The key contains a character outside `[a-zA-Z0-9_-]`.
    #[error("film identifier contains invalid characters")]
    InvalidFormat,

    /// The key length is outside the 3–200 byte range.
    #[error("film identifier length {len} is outside {MIN_KEY_LEN}-{MAX_KEY_LEN}")]
    InvalidLength {
        /// Byte length of the rejected key.
        len: usize,
    },

    /// The lowercased key contains a blocklisted substring.
    #[error("film identifier contains disallowed content: {needle}")]
    DisallowedContent {
        /// The blocklist entry that matched.
        needle: &'static str,
    },
}

/// A validated film identifier.
///
/// Instances are guaranteed to satisfy the decode-side contract above, so a
/// `FilmKey` can be embedded in URLs, store keys, and log lines without
/// further sanitization.
///
/// # Examples
///
/// ```
/// use reelshare::FilmKey;
///
/// let key = FilmKey::parse("no-other-land-2024").unwrap();
/// assert_eq!(key.as_str(), "no-other-land-2024");
///
/// assert!(FilmKey::parse("x").is_err());
/// assert!(FilmKey::parse("a<script>b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilmKey(String);

impl FilmKey {
    /// Parse and validate a candidate film key.
    ///
    /// Checks run in the order the sharing pipeline reports them: charset,
    /// then length, then content blocklist.
    pub fn parse(input: &str) -> Result<Self, FilmKeyError> {
        if input.is_empty() || !input.bytes().all(is_key_byte) {
            return Err(FilmKeyError::InvalidFormat);
        }
        let len = input.len();
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&len) {
            return Err(FilmKeyError::InvalidLength { len });
        }
        let lowered = input.to_ascii_lowercase();
        for needle in BLOCKLIST {
            if lowered.contains(needle) {
                return Err(FilmKeyError::DisallowedContent { needle });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Return the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl fmt::Display for FilmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FilmKey {
    type Err = FilmKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FilmKey {
    type Error = FilmKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilmKey> for String {
    fn from(key: FilmKey) -> Self {
        key.0
    }
}

impl AsRef<str> for FilmKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
