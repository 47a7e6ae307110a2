//! The experience state store.
//!
//! [`ExperienceStore`] is the single source of truth for the user's
//! favorites, the active rating threshold, and the experience currently
//! open in the detail view. It is constructed explicitly at the
//! application root and handed to the presentation layer; there is no
//! ambient global instance.
//!
//! # Lifecycle
//!
//! 1. [`ExperienceStore::new`] builds an empty store over a storage
//!    backend.
//! 2. [`ExperienceStore::rehydrate`] loads the last persisted snapshot,
//!    if any. [`ExperienceStore::provision`] does both.
//! 3. The four mutation operations update the state, persist the
//!    preference fields, then notify every observer.
//!
//! # Failure semantics
//!
//! Mutations never fail. When the backend rejects a write (quota,
//! disabled storage, I/O) the error is logged and dropped: the in-memory
//! state is already updated and stays authoritative for the session.

use std::collections::BTreeSet;

use explorer_types::{Experience, ExperienceId, RatingThreshold};
use tracing::{debug, warn};

use crate::persist::{self, PersistedPreferences, STORE_KEY};
use crate::storage::DurableStorage;

/// Observable state of the experience store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceStoreState {
    /// The experience shown in the detail view (not persisted).
    pub selected_experience: Option<Experience>,
    /// Favorite experience ids.
    pub favorites: BTreeSet<ExperienceId>,
    /// Minimum rating applied to the external list.
    pub rating_filter: Option<RatingThreshold>,
}

impl ExperienceStoreState {
    /// Whether `id` is a favorite.
    pub fn is_favorite(&self, id: ExperienceId) -> bool {
        self.favorites.contains(&id)
    }

    fn preferences(&self) -> PersistedPreferences {
        PersistedPreferences {
            favorites: self.favorites.clone(),
            rating_filter: self.rating_filter,
        }
    }
}

/// Handle returned by [`ExperienceStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after every completed mutation.
pub type Observer = Box<dyn FnMut(&ExperienceStoreState)>;

/// Client-side experience state container with durable persistence.
pub struct ExperienceStore<S: DurableStorage> {
    state: ExperienceStoreState,
    storage: S,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: DurableStorage> core::fmt::Debug for ExperienceStore<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExperienceStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: DurableStorage> ExperienceStore<S> {
    /// Create an empty store over `storage` without reading it.
    pub fn new(storage: S) -> Self {
        Self {
            state: ExperienceStoreState::default(),
            storage,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store and rehydrate it from `storage`.
    pub fn provision(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.rehydrate();
        store
    }

    /// Replace the preference fields with the persisted snapshot.
    ///
    /// A missing snapshot leaves the state untouched. An unreadable one
    /// (storage failure, corrupt JSON, unknown schema version) is logged
    /// and ignored so the session starts with empty preferences.
    pub fn rehydrate(&mut self) {
        let raw = match self.storage.get_item(STORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted experience snapshot");
                return;
            }
            Err(e) => {
                warn!(error = %e, key = STORE_KEY, "Could not read experience snapshot");
                return;
            }
        };

        match persist::decode(&raw) {
            Ok(prefs) => {
                debug!(
                    favorites = prefs.favorites.len(),
                    rating_filter = ?prefs.rating_filter,
                    "Experience store rehydrated"
                );
                self.state.favorites = prefs.favorites;
                self.state.rating_filter = prefs.rating_filter;
                self.notify();
            }
            Err(e) => {
                warn!(error = %e, key = STORE_KEY, "Discarding unreadable experience snapshot");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Current state.
    pub const fn state(&self) -> &ExperienceStoreState {
        &self.state
    }

    /// The experience open in the detail view.
    pub const fn selected_experience(&self) -> Option<&Experience> {
        self.state.selected_experience.as_ref()
    }

    /// Favorite experience ids.
    pub const fn favorites(&self) -> &BTreeSet<ExperienceId> {
        &self.state.favorites
    }

    /// Active rating threshold.
    pub const fn rating_filter(&self) -> Option<RatingThreshold> {
        self.state.rating_filter
    }

    /// Whether `id` is a favorite.
    pub fn is_favorite(&self, id: ExperienceId) -> bool {
        self.state.is_favorite(id)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Open `experience` in the detail view, or close it with `None`.
    pub fn set_selected_experience(&mut self, experience: Option<Experience>) {
        debug!(id = ?experience.as_ref().map(|e| e.id), "Selected experience changed");
        self.state.selected_experience = experience;
        self.notify();
    }

    /// Mark `id` as a favorite. Adding an existing favorite is a no-op.
    pub fn add_favorite(&mut self, id: ExperienceId) {
        if self.state.favorites.insert(id) {
            debug!(%id, "Favorite added");
            self.persist();
        }
        self.notify();
    }

    /// Unmark `id`. Removing an absent favorite is a no-op.
    pub fn remove_favorite(&mut self, id: ExperienceId) {
        if self.state.favorites.remove(&id) {
            debug!(%id, "Favorite removed");
            self.persist();
        }
        self.notify();
    }

    /// Set or clear the minimum rating for the external list.
    pub fn set_rating_filter(&mut self, threshold: Option<RatingThreshold>) {
        debug!(rating_filter = ?threshold, "Rating filter changed");
        self.state.rating_filter = threshold;
        self.persist();
        self.notify();
    }

    /// Flip the favorite state of `id` and return the new membership.
    pub fn toggle_favorite(&mut self, id: ExperienceId) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register `observer` to run after every completed mutation.
    ///
    /// There is no batching: callers receive one notification per
    /// mutation, including mutations that left the state unchanged.
    pub fn subscribe(&mut self, observer: impl FnMut(&ExperienceStoreState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer. Returns whether it was
    /// registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }

    fn persist(&self) {
        let raw = match persist::encode(&self.state.preferences()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to encode experience snapshot");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(STORE_KEY, &raw) {
            warn!(
                error = %e,
                key = STORE_KEY,
                "Failed to persist experience preferences, keeping in-memory state"
            );
        }
    }
}
