//! reelshare - favorites sharing codec for the reelkeeper film tracker.
//!
//! Turns a user's list of films into a short, URL-embeddable string and
//! safely reverses that process when another user opens the link. Lists of
//! hundreds of films fit in a URL because each film is substituted by a
//! dense 3-character code before compression; two historical wire formats
//! stay readable so old links never break; and every decoded value is
//! treated as hostile input, since it arrives from a query parameter any
//! user can hand-edit.
//!
//! # Modules
//!
//! - [`registry`]: bidirectional film-key / short-code dictionary with
//!   single-flight lazy catalog loading
//! - [`codec`]: transport compression seam (URL-safe, reversible)
//! - [`wire`]: the current and legacy wire bodies and their detection
//! - [`encoder`]: film keys to share URL
//! - [`decoder`]: untrusted `favs` parameter to validated film keys
//! - [`config`]: origin and decoder bounds
//! - [`stores`]: read seam over the per-user list stores
//! - [`film_key`]: validated film identifier
//! - [`error`]: the decode error taxonomy and registry errors
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//!
//! use reelshare::codec::Lz4UrlCodec;
//! use reelshare::registry::{ShortCode, ShortCodeRegistry};
//! use reelshare::{decode_share, share_url};
//!
//! let registry = ShortCodeRegistry::from_entries([
//!     ("no-other-land-2024".to_string(), ShortCode::parse("a4g").unwrap()),
//!     ("flow-2024".to_string(), ShortCode::parse("b1z").unwrap()),
//! ])
//! .unwrap();
//! let codec = Lz4UrlCodec;
//!
//! let url = share_url(
//!     &registry,
//!     &codec,
//!     "https://reelkeeper.example",
//!     &["no-other-land-2024".to_string(), "flow-2024".to_string()],
//!     &HashSet::from(["flow-2024".to_string()]),
//!     Some("festival picks"),
//! );
//! let favs = url.split("favs=").nth(1).unwrap();
//!
//! let share = decode_share(&registry, &codec, favs).unwrap();
//! assert_eq!(share.film_keys.len(), 2);
//! assert!(share.priorities.iter().any(|k| k.as_str() == "flow-2024"));
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod film_key;
pub mod registry;
pub mod stores;
pub mod wire;

pub use codec::{Lz4UrlCodec, TransportCodec, TransportError};
pub use config::{DecodeLimits, ShareConfig};
pub use decoder::{DecodedShare, decode_share, decode_share_with_limits};
pub use encoder::{build_payload, share_url, share_url_from_source};
pub use error::{RegistryError, ShareError};
pub use film_key::{FilmKey, FilmKeyError};
pub use registry::{RegistryHandle, ShortCode, ShortCodeRegistry};
