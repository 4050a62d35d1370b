//! Favorites: an ordered list of snapshots, unique by place name.
//!
//! The whole list is written back on every change. A change only becomes
//! visible in memory after the write succeeded, so `list()` always reflects
//! what is on disk.

use std::collections::HashSet;
use std::sync::Arc;

use weatherdeck_weather::WeatherSnapshot;

use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStore;

/// Storage key for the favorites list (a JSON array of snapshots).
pub const FAVORITES_KEY: &str = "favorites";

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<WeatherSnapshot>,
}

impl FavoritesStore {
    /// Load favorites from `storage`. A missing, unreadable or corrupt value
    /// yields an empty list. Repeated names keep their first entry.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut items: Vec<WeatherSnapshot> = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt favorites: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read favorites: {}", e);
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let before = items.len();
        items.retain(|fav| seen.insert(fav.name.clone()));
        if items.len() != before {
            tracing::warn!("Dropped {} duplicate favorites", before - items.len());
        }

        tracing::debug!("Loaded {} favorites", items.len());
        Self { storage, items }
    }

    /// Current favorites in insertion order.
    pub fn list(&self) -> &[WeatherSnapshot] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|fav| fav.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `snapshot` unless a favorite with the same name exists.
    ///
    /// Returns `Ok(false)` for a duplicate; nothing is written in that case.
    pub fn add(&mut self, snapshot: WeatherSnapshot) -> StorageResult<bool> {
        if self.contains(&snapshot.name) {
            return Ok(false);
        }

        let mut updated = self.items.clone();
        updated.push(snapshot);
        self.persist(&updated)?;
        self.items = updated;
        Ok(true)
    }

    /// Remove the favorite named `name`. Returns `Ok(false)` if there was none.
    pub fn remove(&mut self, name: &str) -> StorageResult<bool> {
        if !self.contains(name) {
            return Ok(false);
        }

        let updated: Vec<WeatherSnapshot> = self
            .items
            .iter()
            .filter(|fav| fav.name != name)
            .cloned()
            .collect();
        self.persist(&updated)?;
        self.items = updated;
        Ok(true)
    }

    /// Drop every favorite and the persisted key.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove(FAVORITES_KEY)?;
        self.items.clear();
        Ok(())
    }

    fn persist(&self, items: &[WeatherSnapshot]) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(items).map_err(|source| StorageError::Serialize {
            key: FAVORITES_KEY.to_string(),
            source,
        })?;
        self.storage.set(FAVORITES_KEY, &json)
    }
}
