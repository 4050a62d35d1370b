use std::sync::Arc;

use weatherdeck_weather::UnitPreference;

use crate::error::StorageResult;
use crate::storage::KeyValueStore;

/// Storage key for the unit preference (`metric` / `imperial`).
pub const UNIT_KEY: &str = "unit";

/// Persisted measurement-unit choice.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Read the persisted unit. Missing, unreadable or malformed values mean `Metric`.
    pub fn get(&self) -> UnitPreference {
        match self.storage.get(UNIT_KEY) {
            Ok(Some(raw)) => raw.parse::<UnitPreference>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored unit preference: {}", e);
                UnitPreference::default()
            }),
            Ok(None) => UnitPreference::default(),
            Err(e) => {
                tracing::warn!("Could not read unit preference: {}", e);
                UnitPreference::default()
            }
        }
    }

    pub fn set(&self, unit: UnitPreference) -> StorageResult<()> {
        self.storage.set(UNIT_KEY, unit.as_str())?;
        tracing::debug!("Persisted unit preference: {}", unit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_to_metric_when_absent() {
        let store = PreferenceStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.get(), UnitPreference::Metric);
    }

    #[test]
    fn test_malformed_value_is_absent() {
        let storage = MemoryStorage::new().with_entry(UNIT_KEY, "kelvin");
        let store = PreferenceStore::new(Arc::new(storage));
        assert_eq!(store.get(), UnitPreference::Metric);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Arc::new(MemoryStorage::new());
        let store = PreferenceStore::new(storage.clone());

        store.set(UnitPreference::Imperial).unwrap();
        assert_eq!(store.get(), UnitPreference::Imperial);
        assert_eq!(storage.get(UNIT_KEY).unwrap().as_deref(), Some("imperial"));
        assert_eq!(storage.write_count(), 1);
    }
}
