//! The catalog state container
//!
//! Holds the record set, the filter configuration, the facets derived from
//! the record set, and pending notifications. The only way to change any of
//! them is [`Store::dispatch`], which applies one [`Action`] under the write
//! lock so readers never observe a half-applied update.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::notification::{Notification, NotificationLevel};
use crate::error::{Error, Result};
use crate::filter::{Facets, FilterConfig, FilterPatch};
use crate::model::Artist;

/// The closed set of state mutations
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole record set
    ReplaceArtists(Vec<Artist>),
    /// Append one record
    AppendArtist(Artist),
    /// Merge filter fields
    SetFilters(FilterPatch),
    /// Restore the default filter configuration
    ResetFilters,
    /// Append a notification
    Notify {
        level: NotificationLevel,
        message: String,
    },
    /// Remove a notification by ID
    Dismiss(u64),
}

impl Action {
    pub fn notify(level: NotificationLevel, message: impl Into<String>) -> Self {
        Action::Notify {
            level,
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ReplaceArtists(_) => "replace_artists",
            Action::AppendArtist(_) => "append_artist",
            Action::SetFilters(_) => "set_filters",
            Action::ResetFilters => "reset_filters",
            Action::Notify { .. } => "notify",
            Action::Dismiss(_) => "dismiss",
        }
    }
}

/// What a dispatched action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Records,
    Filters,
    Notifications,
}

/// A consistent copy of the whole state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub artists: Arc<[Artist]>,
    pub filters: FilterConfig,
    pub facets: Facets,
    pub notifications: Vec<Notification>,
}

#[derive(Debug)]
struct State {
    artists: Arc<[Artist]>,
    filters: FilterConfig,
    facets: Facets,
    notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            artists: Arc::from(Vec::new()),
            filters: FilterConfig::default(),
            facets: Facets::default(),
            notifications: Vec::new(),
            next_notification_id: 1,
        }
    }
}

impl State {
    fn set_artists(&mut self, artists: Vec<Artist>) {
        self.facets = Facets::from_artists(&artists);
        self.artists = artists.into();
    }
}

/// Process-wide catalog state
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<State>,
}

impl Store {
    /// An empty store: no artists, default filters, no notifications
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action atomically
    pub fn dispatch(&self, action: Action) -> Result<Effect> {
        tracing::debug!(action = action.name(), "Dispatching");
        let mut state = self.write();

        match action {
            Action::ReplaceArtists(artists) => {
                if let Some(id) = first_duplicate(&artists) {
                    return Err(Error::DuplicateArtist { id });
                }
                state.set_artists(artists);
                Ok(Effect::Records)
            }
            Action::AppendArtist(artist) => {
                if state.artists.iter().any(|a| a.id == artist.id) {
                    return Err(Error::DuplicateArtist { id: artist.id });
                }
                let mut artists = state.artists.to_vec();
                artists.push(artist);
                state.set_artists(artists);
                Ok(Effect::Records)
            }
            Action::SetFilters(patch) => {
                state.filters.apply(patch);
                Ok(Effect::Filters)
            }
            Action::ResetFilters => {
                state.filters = FilterConfig::default();
                Ok(Effect::Filters)
            }
            Action::Notify { level, message } => {
                let id = state.next_notification_id;
                state.next_notification_id += 1;
                state.notifications.push(Notification { id, level, message });
                Ok(Effect::Notifications)
            }
            Action::Dismiss(id) => {
                state.notifications.retain(|n| n.id != id);
                Ok(Effect::Notifications)
            }
        }
    }

    pub fn artists(&self) -> Arc<[Artist]> {
        Arc::clone(&self.read().artists)
    }

    pub fn artist(&self, id: &str) -> Option<Artist> {
        self.read().artists.iter().find(|a| a.id == id).cloned()
    }

    pub fn filters(&self) -> FilterConfig {
        self.read().filters.clone()
    }

    pub fn facets(&self) -> Facets {
        self.read().facets.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.read().notifications.clone()
    }

    /// Everything at once, from a single read
    pub fn snapshot(&self) -> Snapshot {
        let state = self.read();
        Snapshot {
            artists: Arc::clone(&state.artists),
            filters: state.filters.clone(),
            facets: state.facets.clone(),
            notifications: state.notifications.clone(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn first_duplicate(artists: &[Artist]) -> Option<String> {
    let mut seen = HashSet::with_capacity(artists.len());
    artists
        .iter()
        .find(|a| !seen.insert(a.id.as_str()))
        .map(|a| a.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CategoryFilter, PriceSpan};
    use crate::model::{fixtures, Category};

    #[test]
    fn test_starts_empty() {
        let store = Store::new();
        let snapshot = store.snapshot();
        assert!(snapshot.artists.is_empty());
        assert_eq!(snapshot.filters, FilterConfig::default());
        assert_eq!(snapshot.facets.price_bounds, PriceSpan::new(0, 5000));
        assert!(snapshot.notifications.is_empty());
    }

    #[test]
    fn test_replace_recomputes_facets() {
        let store = Store::new();
        let effect = store.dispatch(Action::ReplaceArtists(fixtures::artists())).unwrap();

        assert_eq!(effect, Effect::Records);
        assert_eq!(store.artists().len(), 10);
        assert_eq!(store.facets(), Facets::from_artists(&fixtures::artists()));
    }

    #[test]
    fn test_replace_rejects_duplicates() {
        let store = Store::new();
        let dupes = vec![Artist::new("1", "A"), Artist::new("1", "B")];

        let err = store.dispatch(Action::ReplaceArtists(dupes)).unwrap_err();
        assert!(matches!(err, Error::DuplicateArtist { id } if id == "1"));
        // Nothing was applied
        assert!(store.artists().is_empty());
    }

    #[test]
    fn test_append() {
        let store = Store::new();
        store.dispatch(Action::ReplaceArtists(fixtures::artists())).unwrap();

        let artist = Artist::new("session-1", "New").with_location("Zagreb").with_price(10, 20);
        store.dispatch(Action::AppendArtist(artist.clone())).unwrap();

        assert_eq!(store.artists().last(), Some(&artist));
        assert!(store.facets().locations.contains(&"Zagreb".to_string()));
        assert_eq!(store.facets().price_bounds.lo, 10);

        let err = store.dispatch(Action::AppendArtist(artist)).unwrap_err();
        assert!(matches!(err, Error::DuplicateArtist { .. }));
    }

    #[test]
    fn test_filter_changes_leave_facets_alone() {
        let store = Store::new();
        store.dispatch(Action::ReplaceArtists(fixtures::artists())).unwrap();
        let before = store.facets();

        let patch = FilterPatch::new().category(Category::Dj).price(0, 100);
        assert_eq!(store.dispatch(Action::SetFilters(patch)).unwrap(), Effect::Filters);

        assert_eq!(store.filters().category, CategoryFilter::Only(Category::Dj));
        assert_eq!(store.facets(), before);
    }

    #[test]
    fn test_reset_filters() {
        let store = Store::new();
        store
            .dispatch(Action::SetFilters(FilterPatch::new().location("new")))
            .unwrap();
        store.dispatch(Action::ResetFilters).unwrap();
        assert_eq!(store.filters(), FilterConfig::default());
    }

    #[test]
    fn test_notify_and_dismiss() {
        let store = Store::new();
        store
            .dispatch(Action::notify(NotificationLevel::Error, "first"))
            .unwrap();
        store
            .dispatch(Action::notify(NotificationLevel::Info, "second"))
            .unwrap();

        let notes = store.notifications();
        assert_eq!(notes.len(), 2);
        assert_ne!(notes[0].id, notes[1].id);

        store.dispatch(Action::Dismiss(notes[0].id)).unwrap();
        let notes = store.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "second");
    }

    #[test]
    fn test_lookup_by_id() {
        let store = Store::new();
        store.dispatch(Action::ReplaceArtists(fixtures::artists())).unwrap();
        assert_eq!(store.artist("2").map(|a| a.name), Some("DJ Pulse".to_string()));
        assert!(store.artist("404").is_none());
    }
}
