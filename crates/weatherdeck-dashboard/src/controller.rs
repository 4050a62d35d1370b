//! The dashboard state machine.
//!
//! Search moves `Idle -> Searching -> Success | Failed`, and any new search
//! start moves it back to `Searching` (or straight to `Failed` for an empty
//! query). Each search start takes a new sequence number; a completion only
//! lands if it carries the latest one, so the last request always wins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use weatherdeck_store::{FavoritesStore, KeyValueStore, PreferenceStore, StorageError};
use weatherdeck_weather::{LookupFailed, UnitPreference, WeatherLookup, WeatherSnapshot};

use crate::error::SearchError;
use crate::notification::{Notification, NotificationKind, DEFAULT_NOTIFICATION_TTL};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success(WeatherSnapshot),
    Failed(String),
}

/// Transient per-session search state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    phase: SearchPhase,
}

impl SearchState {
    /// Raw text of the most recent search.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching)
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn last_snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.phase {
            SearchPhase::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// What the front end should draw for the search panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    Idle,
    Loading { query: &'a str },
    Result(&'a WeatherSnapshot),
    Error(&'a str),
}

/// Handle for one in-flight lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    /// Trimmed place name to look up
    pub place: String,
    pub unit: UnitPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFavoriteOutcome {
    Added,
    AlreadyPresent,
    /// No successful search result is on screen
    NothingToAdd,
    /// The write failed; a warning notification was raised
    NotSaved,
}

pub struct DashboardController {
    lookup: Arc<dyn WeatherLookup>,
    preferences: PreferenceStore,
    favorites: FavoritesStore,
    unit: UnitPreference,
    search: SearchState,
    latest_seq: u64,
    notification: Option<Notification>,
    notification_ttl: Duration,
}

impl DashboardController {
    /// Build a controller, restoring the unit preference and favorites from `storage`.
    pub fn new(lookup: Arc<dyn WeatherLookup>, storage: Arc<dyn KeyValueStore>) -> Self {
        let preferences = PreferenceStore::new(Arc::clone(&storage));
        let unit = preferences.get();
        let favorites = FavoritesStore::load(storage);

        tracing::info!(
            "Dashboard ready: unit={}, {} favorites",
            unit,
            favorites.len()
        );

        Self {
            lookup,
            preferences,
            favorites,
            unit,
            search: SearchState::default(),
            latest_seq: 0,
            notification: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn unit(&self) -> UnitPreference {
        self.unit
    }

    pub fn favorites(&self) -> &[WeatherSnapshot] {
        self.favorites.list()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn view(&self) -> ViewState<'_> {
        match &self.search.phase {
            SearchPhase::Idle => ViewState::Idle,
            SearchPhase::Searching => ViewState::Loading {
                query: self.search.query.trim(),
            },
            SearchPhase::Success(snapshot) => ViewState::Result(snapshot),
            SearchPhase::Failed(message) => ViewState::Error(message),
        }
    }

    /// The lookup service, for callers that run lookups off the event loop.
    pub fn lookup_service(&self) -> Arc<dyn WeatherLookup> {
        Arc::clone(&self.lookup)
    }

    /// Start a search. Returns the ticket to look up, or `None` when the query
    /// was empty and the search already failed locally.
    ///
    /// Any search still in flight is superseded.
    pub fn begin_search(&mut self, raw_query: &str) -> Option<SearchTicket> {
        self.latest_seq += 1;
        self.search.query = raw_query.to_string();

        let place = raw_query.trim();
        if place.is_empty() {
            self.fail(SearchError::EmptyQuery);
            return None;
        }

        if self.search.is_in_flight() {
            tracing::debug!("Superseding in-flight search with {:?}", place);
        }
        self.search.phase = SearchPhase::Searching;

        Some(SearchTicket {
            seq: self.latest_seq,
            place: place.to_string(),
            unit: self.unit,
        })
    }

    /// Apply the outcome of `ticket`'s lookup.
    ///
    /// Returns `false` if a newer search started in the meantime and the result
    /// was dropped.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<WeatherSnapshot, LookupFailed>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                "Discarding stale result for {:?} (seq {} < {})",
                ticket.place,
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!("Found {}: {}", snapshot.heading(), snapshot.formatted_temperature());
                self.search.phase = SearchPhase::Success(snapshot);
            }
            Err(e) => self.fail(e.into()),
        }
        true
    }

    /// Run a whole search on the caller's task.
    pub async fn start_search(&mut self, raw_query: &str) {
        let Some(ticket) = self.begin_search(raw_query) else {
            return;
        };

        let lookup = self.lookup_service();
        let result = lookup.lookup(&ticket.place, ticket.unit).await;
        self.complete_search(&ticket, result);
    }

    /// Flip metric/imperial and persist it. The displayed result and the
    /// favorites keep the unit they were fetched in.
    pub fn toggle_unit(&mut self) -> UnitPreference {
        let next = self.unit.toggled();
        match self.preferences.set(next) {
            Ok(()) => self.unit = next,
            Err(e) => self.storage_warning(e),
        }
        self.unit
    }

    /// Save the currently displayed result as a favorite.
    pub fn add_current_to_favorites(&mut self) -> AddFavoriteOutcome {
        let Some(snapshot) = self.search.last_snapshot().cloned() else {
            return AddFavoriteOutcome::NothingToAdd;
        };

        match self.favorites.add(snapshot) {
            Ok(true) => AddFavoriteOutcome::Added,
            Ok(false) => AddFavoriteOutcome::AlreadyPresent,
            Err(e) => {
                self.storage_warning(e);
                AddFavoriteOutcome::NotSaved
            }
        }
    }

    /// Returns whether a favorite was removed.
    pub fn remove_favorite(&mut self, name: &str) -> bool {
        self.favorites.remove(name).unwrap_or_else(|e| {
            self.storage_warning(e);
            false
        })
    }

    pub fn clear_favorites(&mut self) {
        if let Err(e) = self.favorites.clear() {
            self.storage_warning(e);
        }
    }

    /// The current notification, if it has not expired or been dismissed.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification_at(Instant::now())
    }

    pub fn notification_at(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible_at(now))
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    fn fail(&mut self, error: SearchError) {
        tracing::debug!("Search failed: {}", error);
        let message = error.user_message();
        self.search.phase = SearchPhase::Failed(message.to_string());
        self.notify(NotificationKind::Error, message);
    }

    fn storage_warning(&mut self, error: StorageError) {
        tracing::warn!("Persistence failed: {}", error);
        self.notify(NotificationKind::Warning, error.user_message());
    }

    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.notification = Some(Notification::new(
            kind,
            message,
            Instant::now(),
            self.notification_ttl,
        ));
    }
}
