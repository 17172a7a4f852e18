//! Transport compression codec seam.
//!
//! The sharing codec treats compression as an external collaborator: a
//! reversible, URL-alphabet-safe text compressor behind a trait. The
//! decoder only relies on the contract `decompress(compress(x)) == x` and on
//! failure being signaled distinctly from an empty result.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

/// Decompression failure modes.
///
/// `Malformed` is the ordinary outcome for tampered or truncated payloads
/// and maps to the decoder's "decompression failed" error. `Internal` is
/// reserved for faults a codec implementation did not anticipate and maps
/// to the decoder's catch-all kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The payload is not a valid compressed stream.
    #[error("payload is not a valid compressed stream")]
    Malformed,

    /// The codec failed in a way it did not anticipate.
    #[error("transport codec fault: {0}")]
    Internal(String),
}

/// A reversible, URL-safe text compressor.
///
/// Compression is infallible (any text can be compressed); decompression is
/// where hostile input surfaces.
pub trait TransportCodec {
    /// Compress `text` into a URL-safe string.
    fn compress(&self, text: &str) -> String;

    /// Reverse [`TransportCodec::compress`].
    fn decompress(&self, payload: &str) -> Result<String, TransportError>;
}

/// Largest decompressed size in bytes this codec will materialize.
///
/// The wire carries an attacker-controlled size prefix that the block
/// decompressor allocates up front, so the bound must hold before any
/// allocation happens. Sized at four bytes per character of the decoder's
/// post-decompression limit, so every text the pipeline could accept still
/// fits.
pub const MAX_DECOMPRESSED_BYTES: usize = 4 * 500_000;

/// Production transport codec: LZ4 block compression wrapped in unpadded
/// URL-safe base64.
///
/// Output alphabet is `[A-Za-z0-9_-]`, a strict subset of the transport
/// charset the decoder accepts, so freshly encoded links always pass the
/// decoder's charset gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4UrlCodec;

impl TransportCodec for Lz4UrlCodec {
    fn compress(&self, text: &str) -> String {
        let compressed = lz4_flex::compress_prepend_size(text.as_bytes());
        URL_SAFE_NO_PAD.encode(compressed)
    }

    fn decompress(&self, payload: &str) -> Result<String, TransportError> {
        let compressed = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TransportError::Malformed)?;

        // Validate the size prefix before the decompressor trusts it: a
        // forged prefix would otherwise force an allocation of whatever
        // size the payload claims.
        let (prefix, body) = compressed
            .split_first_chunk::<4>()
            .ok_or(TransportError::Malformed)?;
        let claimed = u32::from_le_bytes(*prefix) as usize;
        if claimed > MAX_DECOMPRESSED_BYTES {
            return Err(TransportError::Malformed);
        }

        let bytes = lz4_flex::block::decompress(body, claimed)
            .map_err(|_| TransportError::Malformed)?;
        String::from_utf8(bytes).map_err(|_| TransportError::Malformed)
    }
}
