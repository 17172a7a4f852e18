//! Favorites decoder and validator.
//!
//! The `favs` query parameter is the one place where this subsystem accepts
//! input that any user can hand-edit, so decoding is a strict short-circuit
//! pipeline: each stage either advances or returns a terminal error, and a
//! terminal error leaves the caller with nothing to partially apply.
//!
//! Stage order (sizes and counts from [`DecodeLimits`]):
//!
//! 1. presence, 2. trim, 3. transport-charset gate, 4. pre-decompression
//! size bound, 5. decompression, 6. post-decompression size bound,
//! 7. wire-format detection, 8. code-to-key resolution, 9. count bound,
//! 10. per-key validation and de-duplication, 11. non-empty result check,
//! 12. priority back-mapping.
//!
//! The charset gate runs before anything else touches the content so that
//! unrelated payloads (`<script`, `javascript:`, smuggled JSON) are rejected
//! on sight; the two size bounds cap compressor work and decompression-bomb
//! amplification before the content is trusted at all.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::codec::{TransportCodec, TransportError};
use crate::config::DecodeLimits;
use crate::error::ShareError;
use crate::film_key::FilmKey;
use crate::registry::{CODE_LEN, ShortCode, ShortCodeRegistry};

/// Punctuation the transport alphabet allows beyond letters and digits.
///
/// This is the union of the output alphabets of every compressor the site
/// has shipped; anything outside it cannot be a payload we produced.
const TRANSPORT_PUNCTUATION: &str = "+/=-_*!~'()";

/// The fully validated result of one decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShare {
    /// Accepted film keys in first-seen order.
    pub film_keys: Vec<FilmKey>,
    /// The subset of accepted keys flagged high priority.
    pub priorities: BTreeSet<FilmKey>,
}

/// Decode an untrusted `favs` parameter with the default limits.
pub fn decode_share(
    registry: &ShortCodeRegistry,
    codec: &impl TransportCodec,
    url_param: &str,
) -> Result<DecodedShare, ShareError> {
    decode_share_with_limits(registry, codec, url_param, &DecodeLimits::default())
}

/// Decode an untrusted `favs` parameter.
///
/// Never panics, whatever the input; every failure mode is a [`ShareError`]
/// whose message is fit for end users.
pub fn decode_share_with_limits(
    registry: &ShortCodeRegistry,
    codec: &impl TransportCodec,
    url_param: &str,
    limits: &DecodeLimits,
) -> Result<DecodedShare, ShareError> {
    // Stages 1-2: presence and trim.
    let trimmed = url_param.trim();
    if trimmed.is_empty() {
        return Err(ShareError::EmptyPayload);
    }

    // Stage 3: transport-charset gate, before any other processing.
    if !trimmed.chars().all(is_transport_char) {
        warn!("share payload rejected at charset gate");
        return Err(ShareError::InvalidFormat);
    }

    // Stage 4: bound compressor work before trusting the content.
    // The charset gate guarantees ASCII, so bytes == characters here.
    if trimmed.len() > limits.max_payload_chars {
        return Err(ShareError::PayloadTooLarge {
            len: trimmed.len(),
            max: limits.max_payload_chars,
        });
    }

    // Stage 5: decompression. An empty result carries no codes and is
    // indistinguishable from failure for our purposes.
    let text = match codec.decompress(trimmed) {
        Ok(text) if text.is_empty() => return Err(ShareError::DecompressionFailed),
        Ok(text) => text,
        Err(TransportError::Malformed) => return Err(ShareError::DecompressionFailed),
        Err(TransportError::Internal(msg)) => return Err(ShareError::Unexpected(msg)),
    };

    // Stage 6: decompression-bomb guard.
    let decompressed_len = text.chars().count();
    if decompressed_len > limits.max_decompressed_chars {
        return Err(ShareError::DecompressedTooLarge {
            len: decompressed_len,
            max: limits.max_decompressed_chars,
        });
    }

    // Stage 7: current-or-legacy wire format.
    let body = crate::wire::WireBody::detect(&text);

    // Stage 8: fixed-width code chunks resolved through the registry.
    // Unknown codes, malformed chunks, and a trailing partial chunk are
    // dropped silently: old links keep working after catalog removals.
    let mut candidates: Vec<&str> = Vec::new();
    for chunk in body.codes().as_bytes().chunks(CODE_LEN) {
        let code = std::str::from_utf8(chunk)
            .ok()
            .and_then(|s| ShortCode::parse(s).ok());
        let Some(code) = code else {
            debug!("malformed code chunk dropped");
            continue;
        };
        match registry.film_key(code) {
            Some(key) => candidates.push(key),
            None => debug!(%code, "unknown short code dropped"),
        }
    }

    // Stage 9: count bounds.
    if candidates.is_empty() {
        return Err(ShareError::NoFavoritesFound);
    }
    if candidates.len() > limits.max_films {
        return Err(ShareError::TooManyItems {
            count: candidates.len(),
            max: limits.max_films,
        });
    }

    // Stage 10: per-key validation. Invalid keys are skipped, not terminal,
    // so one bad catalog row cannot poison an otherwise valid share.
    // Duplicates keep their first-seen position.
    let mut film_keys: Vec<FilmKey> = Vec::with_capacity(candidates.len());
    let mut seen: HashSet<FilmKey> = HashSet::with_capacity(candidates.len());
    for raw in candidates {
        match FilmKey::parse(raw) {
            Ok(key) => {
                if seen.insert(key.clone()) {
                    film_keys.push(key);
                }
            }
            Err(err) => warn!(%err, "film key rejected during share decode"),
        }
    }

    // Stage 11: all-invalid is distinct from none-decoded.
    if film_keys.is_empty() {
        return Err(ShareError::NoValidFavorites);
    }

    // Stage 12: back-map priority codes, keeping only accepted keys.
    let mut priorities = BTreeSet::new();
    if let crate::wire::WireBody::Current(payload) = &body {
        for code_text in payload.priority_codes() {
            let resolved = ShortCode::parse(code_text)
                .ok()
                .and_then(|code| registry.film_key(code))
                .and_then(|raw| FilmKey::parse(raw).ok());
            if let Some(key) = resolved {
                if seen.contains(&key) {
                    priorities.insert(key);
                }
            }
        }
    }

    Ok(DecodedShare {
        film_keys,
        priorities,
    })
}

fn is_transport_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || TRANSPORT_PUNCTUATION.contains(c)
}
