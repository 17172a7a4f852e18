//! Fuzz harness for the favorites decoder.
//!
//! The `favs` parameter is attacker-editable, so the decoder must never
//! panic: every input, however malformed, has to come back as `Ok` or as a
//! `ShareError` value. This target also drives the legacy/current format
//! sniffing by compressing arbitrary text and feeding it back through the
//! full pipeline.

#![no_main]
use libfuzzer_sys::fuzz_target;
use reelshare::codec::{Lz4UrlCodec, TransportCodec};
use reelshare::registry::{ShortCode, ShortCodeRegistry};
use reelshare::decode_share;

fn registry() -> ShortCodeRegistry {
    ShortCodeRegistry::from_entries([
        ("no-other-land-2024".to_string(), ShortCode::parse("a4g").unwrap()),
        ("flow-2024".to_string(), ShortCode::parse("b1z").unwrap()),
        ("ok".to_string(), ShortCode::parse("ccc").unwrap()),
    ])
    .expect("fixture registry is consistent")
}

fuzz_target!(|data: &[u8]| {
    let registry = registry();
    let codec = Lz4UrlCodec;

    if let Ok(text) = std::str::from_utf8(data) {
        // Raw parameter path: must return a value, never panic.
        let _ = decode_share(&registry, &codec, text);

        // Well-compressed path: arbitrary decompressed bodies exercise the
        // format sniffing and every post-decompression stage.
        let payload = codec.compress(text);
        let _ = decode_share(&registry, &codec, &payload);
    }
});
