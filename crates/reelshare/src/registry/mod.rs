//! Short-code registry: the bidirectional, append-only dictionary between
//! film keys and dense 3-character codes.
//!
//! # Code Form
//!
//! ```text
//! <digit0><digit1><digit2>      62-symbol alphabet, little-endian base 62
//! ```
//!
//! The alphabet is `a..z A..Z 0..9` in digit order, giving a code space of
//! 62^3 = 238,328 films. Codes are assigned sequentially when a film first
//! enters the registry and are never reassigned while the film key remains
//! valid.
//!
//! Film keys are stored here exactly as the catalog spells them. The
//! registry is a lookup table, not a trust boundary: keys resolved during a
//! share decode still pass through [`crate::FilmKey::parse`] before they
//! reach a caller.
//!
//! # Invariant
//!
//! The mapping film key <-> short code is injective in both directions. The
//! catalog scan fails closed on any duplicate rather than letting one entry
//! shadow another.

mod loader;

pub use loader::{CatalogEntry, CatalogSource, JsonCatalogFile, RegistryHandle, StaticCatalog};

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::RegistryError;

/// The 62-symbol code alphabet in digit order.
pub const CODE_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed short-code width in characters.
pub const CODE_LEN: usize = 3;

/// Total number of representable codes (62^3).
pub const CODE_SPACE: usize = 62 * 62 * 62;

/// Why a candidate short code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ShortCodeError {
    /// The code is not exactly [`CODE_LEN`] characters.
    #[error("short code must be exactly {CODE_LEN} characters, got {len}")]
    InvalidLength {
        /// Byte length of the rejected code.
        len: usize,
    },

    /// The code contains a character outside `[a-zA-Z0-9]`.
    #[error("short code contains characters outside the code alphabet")]
    InvalidCharacter,
}

/// A fixed-width 3-character film code.
///
/// Instances are guaranteed to be exactly three bytes from the 62-symbol
/// alphabet, so a `ShortCode` can be concatenated into a share payload
/// without escaping. Cheaply copyable (3 bytes inline).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortCode([u8; CODE_LEN]);

impl ShortCode {
    /// Parse a short code from text, validating width and alphabet.
    pub fn parse(input: &str) -> Result<Self, ShortCodeError> {
        let bytes = input.as_bytes();
        if bytes.len() != CODE_LEN {
            return Err(ShortCodeError::InvalidLength { len: bytes.len() });
        }
        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(ShortCodeError::InvalidCharacter);
        }
        let mut code = [0u8; CODE_LEN];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }

    /// Derive the code at a given allocation index (little-endian base 62).
    ///
    /// `index` is taken modulo the code space, matching the wrap-around of
    /// the allocation probe.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let index = index % CODE_SPACE;
        let code = [
            CODE_ALPHABET[index % 62],
            CODE_ALPHABET[(index / 62) % 62],
            CODE_ALPHABET[(index / (62 * 62)) % 62],
        ];
        Self(code)
    }

    /// Return the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Alphabet membership was checked at construction; the bytes are
        // always ASCII.
        std::str::from_utf8(&self.0).expect("short code bytes are ASCII")
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortCode({})", self.as_str())
    }
}

impl std::str::FromStr for ShortCode {
    type Err = ShortCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ShortCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShortCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// The bidirectional film-key / short-code dictionary.
///
/// Built once per process from the full catalog, then used as an immutable
/// lookup table. The only mutation path is [`ShortCodeRegistry::allocate`],
/// which the catalog-growth pipeline calls offline; the sharing hot path
/// never mutates.
#[derive(Debug, Default, Clone)]
pub struct ShortCodeRegistry {
    key_to_code: HashMap<String, ShortCode>,
    code_to_key: HashMap<ShortCode, String>,
}

impl ShortCodeRegistry {
    /// Build a registry from catalog entries, enforcing injectivity in both
    /// directions.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ShortCode)>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for (key, code) in entries {
            if let Some(existing) = registry.key_to_code.get(&key) {
                return Err(RegistryError::CorruptCatalog {
                    reason: format!("film key {key} is mapped to both {existing} and {code}"),
                });
            }
            if let Some(existing) = registry.code_to_key.get(&code) {
                return Err(RegistryError::CorruptCatalog {
                    reason: format!("short code {code} is mapped to both {existing} and {key}"),
                });
            }
            registry.key_to_code.insert(key.clone(), code);
            registry.code_to_key.insert(code, key);
        }
        debug!(films = registry.len(), "short-code registry built");
        Ok(registry)
    }

    /// Look up the short code for a film key.
    ///
    /// `None` means the film is not (yet) known here and therefore cannot be
    /// shared; it is not an error.
    #[must_use]
    pub fn code_for(&self, key: &str) -> Option<ShortCode> {
        self.key_to_code.get(key).copied()
    }

    /// Look up the film key for a short code.
    ///
    /// `None` is legitimate: an old share link can reference a film that has
    /// since been removed, or the code may be forged.
    #[must_use]
    pub fn film_key(&self, code: ShortCode) -> Option<&str> {
        self.code_to_key.get(&code).map(String::as_str)
    }

    /// Number of films in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key_to_code.len()
    }

    /// Whether the registry holds no films.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_to_code.is_empty()
    }

    /// Assign a short code to a film key, growing the registry.
    ///
    /// Idempotent for keys that already have a code. Otherwise probes from
    /// `index = len + attempt`, deriving the base-62 code at each index,
    /// until an unoccupied code is found. The probe guards against earlier
    /// manual assignments already occupying the natural index.
    pub fn allocate(&mut self, key: impl Into<String>) -> Result<ShortCode, RegistryError> {
        let key = key.into();
        if let Some(code) = self.key_to_code.get(&key) {
            return Ok(*code);
        }
        if self.code_to_key.len() >= CODE_SPACE {
            return Err(RegistryError::CodeSpaceExhausted);
        }
        let start = self.len();
        for attempt in 0..CODE_SPACE {
            let code = ShortCode::from_index(start + attempt);
            if !self.code_to_key.contains_key(&code) {
                self.key_to_code.insert(key.clone(), code);
                self.code_to_key.insert(code, key);
                return Ok(code);
            }
        }
        Err(RegistryError::CodeSpaceExhausted)
    }
}
