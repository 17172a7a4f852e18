//! Catalog loading and single-flight lazy initialization.
//!
//! The catalog scan is the only I/O the sharing codec performs, and it is
//! paid once per process: `RegistryHandle` memoizes the loaded registry and
//! collapses concurrent first-use callers onto the same in-flight load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::{ShortCode, ShortCodeRegistry};
use crate::error::RegistryError;

/// One film's row in the backing catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable film identifier, as the catalog spells it.
    pub film_key: String,
    /// The code assigned when the film entered the catalog.
    pub short_code: ShortCode,
}

/// Source of catalog entries for the registry scan.
///
/// Implementations are injected rather than hard-wired so that tests (and
/// the fuzz harness) can supply an in-memory catalog.
pub trait CatalogSource {
    /// Read the full catalog.
    ///
    /// Errors here are fatal to the sharing feature: without the code
    /// tables there is nothing to encode or decode against.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogEntry>, RegistryError>> + Send;
}

/// Catalog source backed by a JSON file: an array of
/// `{"film_key": ..., "short_code": ...}` records.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonCatalogFile {
    async fn load(&self) -> Result<Vec<CatalogEntry>, RegistryError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&raw).map_err(|err| RegistryError::CorruptCatalog {
                reason: format!("{}: {err}", self.path.display()),
            })?;
        debug!(path = %self.path.display(), films = entries.len(), "catalog read");
        Ok(entries)
    }
}

/// In-memory catalog source, mainly for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    /// Build a static catalog from entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogSource for StaticCatalog {
    async fn load(&self) -> Result<Vec<CatalogEntry>, RegistryError> {
        Ok(self.entries.clone())
    }
}

/// Lazily-loaded, process-wide registry handle.
///
/// The first `get()` triggers the catalog scan; concurrent callers before
/// completion await the same in-flight load rather than re-reading the
/// catalog. After the first success every call is a synchronous lookup
/// against the memoized tables. A failed load is not cached, so a transient
/// I/O error can be retried by the next caller.
#[derive(Debug)]
pub struct RegistryHandle<S> {
    source: S,
    cell: OnceCell<ShortCodeRegistry>,
}

impl<S: CatalogSource> RegistryHandle<S> {
    /// Create a handle over a catalog source. No I/O happens until `get()`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Return the loaded registry, scanning the catalog on first use.
    pub async fn get(&self) -> Result<&ShortCodeRegistry, RegistryError> {
        self.cell
            .get_or_try_init(|| async {
                let entries = self.source.load().await.inspect_err(|err| {
                    warn!(%err, "catalog load failed");
                })?;
                ShortCodeRegistry::from_entries(
                    entries.into_iter().map(|e| (e.film_key, e.short_code)),
                )
            })
            .await
    }

    /// Return the registry if it has already been loaded.
    #[must_use]
    pub fn try_get(&self) -> Option<&ShortCodeRegistry> {
        self.cell.get()
    }
}
