//! Favorites and preferences persisted through `FileStorage` and reloaded,
//! the way a second session would see them.

use std::sync::Arc;

use weatherdeck_store::{
    FavoritesStore, FileStorage, KeyValueStore, PreferenceStore, FAVORITES_KEY, UNIT_KEY,
};
use weatherdeck_weather::{UnitPreference, WeatherSnapshot};

fn snapshot(name: &str, country: &str, temp: f64, unit: UnitPreference) -> WeatherSnapshot {
    WeatherSnapshot {
        name: name.to_string(),
        country: country.to_string(),
        temp,
        unit,
    }
}

fn open(dir: &std::path::Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStorage::open(dir).unwrap())
}

#[test]
fn test_favorites_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut favorites = FavoritesStore::load(open(dir.path()));
        favorites
            .add(snapshot("London", "GB", 15.0, UnitPreference::Metric))
            .unwrap();
        favorites
            .add(snapshot("Boston", "US", 61.2, UnitPreference::Imperial))
            .unwrap();
        favorites.remove("London").unwrap();
        favorites
            .add(snapshot("Tokyo", "JP", 21.4, UnitPreference::Metric))
            .unwrap();
    }

    let favorites = FavoritesStore::load(open(dir.path()));
    assert_eq!(
        favorites.list(),
        &[
            snapshot("Boston", "US", 61.2, UnitPreference::Imperial),
            snapshot("Tokyo", "JP", 21.4, UnitPreference::Metric),
        ]
    );
}

#[test]
fn test_favorites_file_is_human_readable_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut favorites = FavoritesStore::load(open(dir.path()));
    favorites
        .add(snapshot("London", "GB", 15.0, UnitPreference::Metric))
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join(FAVORITES_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "name": "London", "country": "GB", "temp": 15.0, "unit": "metric" }
        ])
    );
}

#[test]
fn test_clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut favorites = FavoritesStore::load(open(dir.path()));
    favorites
        .add(snapshot("London", "GB", 15.0, UnitPreference::Metric))
        .unwrap();
    favorites.clear().unwrap();

    assert!(!dir.path().join(FAVORITES_KEY).exists());
    assert!(FavoritesStore::load(open(dir.path())).is_empty());
}

#[test]
fn test_corrupt_favorites_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(FAVORITES_KEY), "[{\"name\": 3}]").unwrap();

    let mut favorites = FavoritesStore::load(open(dir.path()));
    assert!(favorites.is_empty());

    favorites
        .add(snapshot("Oslo", "NO", -2.0, UnitPreference::Metric))
        .unwrap();
    assert_eq!(FavoritesStore::load(open(dir.path())).len(), 1);
}

#[test]
fn test_unit_preference_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    PreferenceStore::new(open(dir.path()))
        .set(UnitPreference::Imperial)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.path().join(UNIT_KEY)).unwrap(),
        "imperial"
    );
    assert_eq!(
        PreferenceStore::new(open(dir.path())).get(),
        UnitPreference::Imperial
    );
}

#[test]
fn test_hand_edited_unit_with_newline_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(UNIT_KEY), "imperial\n").unwrap();
    assert_eq!(
        PreferenceStore::new(open(dir.path())).get(),
        UnitPreference::Imperial
    );
}
