//! Read seam over the per-user list stores.
//!
//! The watchlist and watched list live outside this subsystem and are
//! synchronized by their owners. The encoder only ever reads from them, and
//! the decoder never touches them at all: merging a decoded share into a
//! store is the caller's responsibility, applied only after the decode
//! succeeded in full.
//!
//! Keys here are plain catalog strings; validated [`crate::FilmKey`]s only
//! appear on the decode side, where input is untrusted.

/// Read access to one user's favorites list.
pub trait FavoritesSource {
    /// Film keys in the user's list order.
    fn film_keys(&self) -> Vec<String>;

    /// Whether a film is flagged high priority.
    fn is_priority(&self, key: &str) -> bool;
}

/// In-memory favorites list: the reference adapter for the site's
/// client-side stores, and the backing for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFavorites {
    films: Vec<(String, bool)>,
}

impl InMemoryFavorites {
    /// Build a list from `(film_key, priority)` pairs, preserving order.
    #[must_use]
    pub fn new(films: Vec<(String, bool)>) -> Self {
        Self { films }
    }

    /// Append a film, keeping the first-seen priority flag for duplicates.
    pub fn add(&mut self, key: impl Into<String>, priority: bool) {
        let key = key.into();
        if !self.films.iter().any(|(existing, _)| existing == &key) {
            self.films.push((key, priority));
        }
    }
}

impl FavoritesSource for InMemoryFavorites {
    fn film_keys(&self) -> Vec<String> {
        self.films.iter().map(|(key, _)| key.clone()).collect()
    }

    fn is_priority(&self, key: &str) -> bool {
        self.films
            .iter()
            .any(|(existing, priority)| existing == key && *priority)
    }
}
