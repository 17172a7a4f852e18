//! Wire body of a share payload, covering both historical formats.
//!
//! # Current Format
//!
//! ```text
//! {"codes":"a4gb1z","priorities":{"b1z":true}}
//! ```
//!
//! JSON object with a string `codes` field (the concatenated 3-character
//! codes, order-preserving) and an optional `priorities` object holding only
//! the codes flagged high priority (sparse, to keep payloads small).
//!
//! # Legacy Format
//!
//! ```text
//! a4gb1z
//! ```
//!
//! The bare codes string, produced by links minted before priorities
//! existed. There is no version tag on the wire, so detection tries the
//! current format and falls back to legacy on any mismatch; the two paths
//! are explicit variants here so each can be tested in isolation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The pre-compression structured record of one share.
///
/// Transient: exists only for the duration of a single encode or decode
/// call, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// Concatenated 3-character codes in selection order.
    pub codes: String,

    /// Codes flagged high priority, each mapped to `true`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub priorities: BTreeMap<String, bool>,
}

impl SharePayload {
    /// Serialize to the current wire format.
    ///
    /// Serialization of a string/bool-map struct cannot fail; the fallible
    /// signature is kept out of the public surface.
    #[must_use]
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Codes whose priority flag is actually set.
    pub fn priority_codes(&self) -> impl Iterator<Item = &str> {
        self.priorities
            .iter()
            .filter(|(_, flagged)| **flagged)
            .map(|(code, _)| code.as_str())
    }
}

/// A decompressed share body, dispatched to one of the two wire formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireBody {
    /// Structured record with codes and optional priorities.
    Current(SharePayload),
    /// Bare concatenated codes string; no priorities.
    Legacy(String),
}

impl WireBody {
    /// Detect the wire format of decompressed text.
    ///
    /// Current requires a JSON object with a string-typed `codes` field;
    /// `priorities` is taken only if it is itself an object, keeping entries
    /// whose value is boolean `true`. Everything else - parse failure, a
    /// non-object, a missing or ill-typed `codes` - is the legacy bare
    /// codes string.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text) else {
            return Self::Legacy(text.to_string());
        };
        let Some(Value::String(codes)) = body.get("codes") else {
            return Self::Legacy(text.to_string());
        };

        let mut priorities = BTreeMap::new();
        if let Some(Value::Object(flags)) = body.get("priorities") {
            for (code, flag) in flags {
                if flag == &Value::Bool(true) {
                    priorities.insert(code.clone(), true);
                }
            }
        }
        Self::Current(SharePayload {
            codes: codes.clone(),
            priorities,
        })
    }

    /// The codes string, regardless of format.
    #[must_use]
    pub fn codes(&self) -> &str {
        match self {
            Self::Current(payload) => &payload.codes,
            Self::Legacy(codes) => codes,
        }
    }
}
