//! Persistence for WeatherDeck: a small key-value backend and the two stores
//! built on it (unit preference and favorites).

pub mod error;
pub mod favorites;
pub mod preferences;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use preferences::{PreferenceStore, UNIT_KEY};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
