//! Error types for the sharing codec.
//!
//! Every decode failure is a value, never a panic: the `favs` parameter is
//! attacker-editable, so the decoder's whole contract is to turn hostile
//! input into one of these kinds plus a message the caller can surface
//! verbatim. Variants appear in the order the pipeline can raise them.

use thiserror::Error;

use crate::film_key::FilmKeyError;

/// Errors produced by the favorites decoder pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ShareError {
    /// The share parameter was empty (or whitespace only).
    #[error("no share payload provided")]
    EmptyPayload,

    /// The payload contains characters outside the transport alphabet.
    #[error("share payload contains invalid characters")]
    InvalidFormat,

    /// The payload exceeds the pre-decompression size bound.
    #[error("share payload is too large ({len} characters, limit {max})")]
    PayloadTooLarge {
        /// Observed payload length in characters.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// The transport codec could not reverse the compression.
    #[error("share payload could not be decompressed")]
    DecompressionFailed,

    /// The decompressed text exceeds the post-decompression size bound.
    #[error("decompressed share payload is too large ({len} characters, limit {max})")]
    DecompressedTooLarge {
        /// Observed decompressed length in characters.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// More film codes than the per-share limit.
    #[error("share contains too many films ({count}, limit {max})")]
    TooManyItems {
        /// Number of decoded film keys.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// The payload decoded to zero film keys.
    #[error("no favorites found in share payload")]
    NoFavoritesFound,

    /// A film identifier failed validation.
    ///
    /// Inside the pipeline invalid keys are skipped rather than terminal;
    /// this variant exists for callers validating individual identifiers.
    #[error(transparent)]
    InvalidFilmKey(#[from] FilmKeyError),

    /// Every decoded film identifier failed validation.
    ///
    /// Distinct from [`ShareError::NoFavoritesFound`]: here decompression,
    /// format detection, and code resolution all succeeded, but the content
    /// was entirely invalid.
    #[error("no valid favorites found in share payload")]
    NoValidFavorites,

    /// Catch-all for faults the pipeline did not anticipate.
    #[error("unexpected error while reading share payload: {0}")]
    Unexpected(String),
}

/// Errors raised while building or growing the short-code registry.
///
/// Registry failures are fatal to the sharing feature (there is nothing to
/// share without the code tables), unlike [`ShareError`] which is always a
/// recoverable per-request outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The backing catalog could not be read.
    #[error("failed to read film catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The backing catalog violates a registry invariant.
    #[error("film catalog is corrupt: {reason}")]
    CorruptCatalog {
        /// What the catalog scan found.
        reason: String,
    },

    /// All 62^3 short codes are assigned.
    #[error("short-code space is exhausted")]
    CodeSpaceExhausted,
}
