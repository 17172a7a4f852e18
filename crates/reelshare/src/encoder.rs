//! Favorites encoder: film keys in, share URL out.
//!
//! Encoding is a pure function of its inputs and the registry's current
//! state. It is never handed untrusted data, so there is no sanitization on
//! this side; the only degenerate outcome is an empty string when nothing in
//! the input can be represented.

use std::collections::{BTreeMap, HashSet};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::codec::TransportCodec;
use crate::registry::{CODE_LEN, ShortCodeRegistry};
use crate::stores::FavoritesSource;
use crate::wire::SharePayload;

/// Path of the share page on the site.
pub const SHARE_PATH: &str = "/shared-favorites";

/// Percent-encoding set for the `name` query value: everything except the
/// characters `encodeURIComponent` leaves alone, so links render the same
/// as the ones the site's frontend historically produced.
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the wire payload for a selection of films.
///
/// Film keys with no registry code are silently dropped on both the codes
/// and the priorities side: they cannot be represented, which makes them
/// unshareable rather than erroneous. Returns `None` when nothing resolved.
#[must_use]
pub fn build_payload(
    registry: &ShortCodeRegistry,
    film_keys: &[String],
    priority_keys: &HashSet<String>,
) -> Option<SharePayload> {
    let mut codes = String::with_capacity(film_keys.len() * CODE_LEN);
    let mut priorities = BTreeMap::new();
    for key in film_keys {
        let Some(code) = registry.code_for(key) else {
            debug!(film = %key, "film has no short code, dropped from share");
            continue;
        };
        codes.push_str(code.as_str());
        if priority_keys.contains(key) {
            priorities.insert(code.as_str().to_string(), true);
        }
    }
    if codes.is_empty() {
        return None;
    }
    Some(SharePayload { codes, priorities })
}

/// Encode a selection of films into a full share URL.
///
/// Returns an empty string when the selection is empty or no film resolved
/// to a code; callers should not offer a share action in that state.
#[must_use]
pub fn share_url(
    registry: &ShortCodeRegistry,
    codec: &impl TransportCodec,
    origin: &str,
    film_keys: &[String],
    priority_keys: &HashSet<String>,
    list_name: Option<&str>,
) -> String {
    let Some(payload) = build_payload(registry, film_keys, priority_keys) else {
        return String::new();
    };
    let favs = codec.compress(&payload.to_wire());

    let mut url = String::new();
    url.push_str(origin);
    url.push_str(SHARE_PATH);
    url.push('?');
    if let Some(name) = list_name.map(str::trim).filter(|name| !name.is_empty()) {
        url.push_str("name=");
        url.push_str(&utf8_percent_encode(name, NAME_ENCODE_SET).to_string());
        url.push('&');
    }
    url.push_str("favs=");
    url.push_str(&favs);
    url
}

/// Encode directly from a favorites store.
#[must_use]
pub fn share_url_from_source(
    registry: &ShortCodeRegistry,
    codec: &impl TransportCodec,
    origin: &str,
    source: &impl FavoritesSource,
    list_name: Option<&str>,
) -> String {
    let film_keys = source.film_keys();
    let priority_keys = film_keys
        .iter()
        .filter(|key| source.is_priority(key))
        .cloned()
        .collect();
    share_url(registry, codec, origin, &film_keys, &priority_keys, list_name)
}
