//! Stagebook - data layer for an artist booking front-end
//!
//! Everything lives in memory: a fixed artist set served by a small query
//! resolver and by a REST route, a state container holding the loaded
//! records and the listing filters, and a filter engine that recomputes the
//! visible artists in the background.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Catalog                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   fails   ┌─────────────┐   ┌───────────────┐  │
//! │  │   Query     │ ────────▶ │    REST     │   │  Onboarding   │  │
//! │  │   Resolver  │           │   Fallback  │   │  Submission   │  │
//! │  └──────┬──────┘           └──────┬──────┘   └───────┬───────┘  │
//! │         │                         │                  │          │
//! │         ▼                         ▼                  ▼          │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │                         Store                               ││
//! │  │  (artists, filters, facets, notifications; named actions)   ││
//! │  └──────────────────────────┬──────────────────────────────────┘│
//! │                             │ snapshot                          │
//! │                             ▼                                   │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │                     Live Filter                             ││
//! │  │  (category, location substring, price overlap; abortable)   ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod loader;
pub mod model;
pub mod query;
pub mod source;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{FilterConfig, FilterPatch, FilterView};
pub use loader::{LoadOutcome, Origin};
pub use model::{Artist, Category, Language, PriceRange, Submission};
pub use query::{QueryRequest, QueryResponse, Resolver};
pub use store::{Action, Notification, NotificationLevel, Store};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use filter::LiveFilter;
use model::{fixtures, session_id};
use source::ArtistSource;
use store::Effect;

/// The catalog handle: store, resolver and live filter together
pub struct Catalog {
    store: Arc<Store>,
    resolver: Resolver,
    live: LiveFilter,
    session_seq: AtomicU64,
    /// Serializes dispatch with the reschedule that follows it
    sync: Mutex<()>,
}

impl Catalog {
    /// An empty catalog whose resolver serves the built-in artists
    pub fn new(config: &Config) -> Self {
        let resolver = Resolver::new(fixtures::artists()).with_latency(config.latency.resolver());
        Self::with_resolver(resolver)
    }

    pub fn with_resolver(resolver: Resolver) -> Self {
        Self {
            store: Arc::new(Store::new()),
            resolver,
            live: LiveFilter::new(),
            session_seq: AtomicU64::new(0),
            sync: Mutex::new(()),
        }
    }

    /// Apply an action, then recompute the visible artists if the records
    /// or the filters changed
    pub fn dispatch(&self, action: Action) -> Result<Effect> {
        let _guard = self.sync.lock().unwrap_or_else(PoisonError::into_inner);
        let effect = self.store.dispatch(action)?;

        if matches!(effect, Effect::Records | Effect::Filters) {
            let snapshot = self.store.snapshot();
            self.live.schedule(snapshot.artists, snapshot.filters);
        }
        Ok(effect)
    }

    /// Load the full artist list, falling back to `source` if the resolver
    /// fails
    pub async fn load<S: ArtistSource>(&self, source: &S) -> LoadOutcome {
        self.load_with(QueryRequest::new(query::documents::GET_ARTISTS), source)
            .await
    }

    /// Load using a custom resolver request
    ///
    /// On total failure an error notification is added and the current
    /// record set is left in place.
    pub async fn load_with<S: ArtistSource>(&self, request: QueryRequest, source: &S) -> LoadOutcome {
        tracing::info!("Loading artists");

        let result = loader::fetch_artists(&self.resolver, request, source)
            .await
            .and_then(|(artists, origin)| {
                let count = artists.len();
                self.dispatch(Action::ReplaceArtists(artists))?;
                Ok((origin, count))
            });

        match result {
            Ok((origin, count)) => {
                tracing::info!(count, %origin, "Loaded artists");
                LoadOutcome::Loaded { origin, count }
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    kept = self.store.artists().len(),
                    "Failed to load artists"
                );
                self.notify(NotificationLevel::Error, format!("Could not load artists: {}", err));
                LoadOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Validate an onboarding submission and add it to the record set
    pub fn submit(&self, submission: Submission) -> Result<Artist> {
        validation::validate_submission(&submission)?;

        let seq = self.session_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let artist = submission.into_artist(session_id(seq));
        self.dispatch(Action::AppendArtist(artist.clone()))?;

        tracing::info!(id = %artist.id, name = %artist.name, "Artist submitted");
        self.notify(
            NotificationLevel::Success,
            format!("{} has been added to the roster", artist.name),
        );
        Ok(artist)
    }

    /// Merge filter fields
    pub fn set_filters(&self, patch: FilterPatch) -> Result<()> {
        self.dispatch(Action::SetFilters(patch)).map(|_| ())
    }

    pub fn reset_filters(&self) -> Result<()> {
        self.dispatch(Action::ResetFilters).map(|_| ())
    }

    pub fn dismiss(&self, id: u64) -> Result<()> {
        self.dispatch(Action::Dismiss(id)).map(|_| ())
    }

    fn notify(&self, level: NotificationLevel, message: String) {
        if let Err(err) = self.dispatch(Action::Notify { level, message }) {
            tracing::warn!(error = %err, "Dropped notification");
        }
    }

    /// Most recently computed visible artists; never waits
    pub fn visible(&self) -> FilterView {
        self.live.current()
    }

    /// Wait for the visible artists to reflect the latest filters
    pub async fn settled(&self) -> FilterView {
        self.live.settled().await
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn live(&self) -> &LiveFilter {
        &self.live
    }
}
