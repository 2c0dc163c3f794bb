//! Persistence backends for the stores.
//!
//! Values are stored as JSON text under string keys. Stores pick a backend
//! through [`Persistence`]: durable state survives restarts, session state
//! lives only as long as the running shell.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Key/value backend holding serialized store state
pub trait Storage: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Where a store keeps its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    Durable,
    Session,
}

impl FromStr for Persistence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "durable" | "local" => Ok(Persistence::Durable),
            "session" => Ok(Persistence::Session),
            other => Err(format!("unknown persistence '{}'", other)),
        }
    }
}

impl Persistence {
    /// Open the backend for this persistence kind rooted at `dir`
    pub fn open(self, dir: &Path) -> Box<dyn Storage> {
        match self {
            Persistence::Durable => Box::new(FileStorage::new(dir)),
            Persistence::Session => Box::new(MemoryStorage::new()),
        }
    }
}

pub fn save<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

/// Load a value; `Ok(None)` when nothing is stored under `key`
pub fn load<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Load a value, falling back to `T::default()` when it is missing or unreadable
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match load(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Discarding stored '{}' state: {}", key, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
    }

    #[test]
    fn test_persistence_from_str() {
        assert_eq!("durable".parse::<Persistence>(), Ok(Persistence::Durable));
        assert_eq!(" Session ".parse::<Persistence>(), Ok(Persistence::Session));
        assert!("cloud".parse::<Persistence>().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        save(&mut storage, "prefs", &Prefs { theme: "dark".into() }).unwrap();
        let prefs: Option<Prefs> = load(&storage, "prefs").unwrap();
        assert_eq!(prefs, Some(Prefs { theme: "dark".into() }));
    }

    #[test]
    fn test_load_missing_is_none() {
        let storage = MemoryStorage::new();
        let prefs: Option<Prefs> = load(&storage, "prefs").unwrap();
        assert!(prefs.is_none());
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set("prefs", "{not json").unwrap();
        assert!(load::<Prefs>(&storage, "prefs").is_err());
        assert_eq!(load_or_default::<Prefs>(&storage, "prefs"), Prefs::default());
    }
}
