use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};
use crate::log;

pub const HIGH_SCORE_KEY: &str = "HIGHEST_SCORE";

/// Integer key/value storage that outlives a play session. Writes are
/// best-effort: implementations log failures instead of returning them.
pub trait HighScoreStore: Send + 'static {
    fn get(&self, key: &str) -> u32;
    fn set(&self, key: &str, value: u32);
}

#[derive(Clone, Default)]
pub struct MemoryHighScoreStore {
    values: Arc<Mutex<HashMap<String, u32>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: u32) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value);
        }
        store
    }

    /// Number of `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self, key: &str) -> u32 {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).copied())
            .unwrap_or(0)
    }

    fn set(&self, key: &str, value: u32) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    #[serde(default)]
    pub scores: BTreeMap<String, u32>,
}

impl Validate for HighScoreTable {
    fn validate(&self) -> Result<(), String> {
        if self.scores.keys().any(|k| k.is_empty()) {
            return Err("high score keys must not be empty".to_string());
        }
        Ok(())
    }
}

/// Persists scores as YAML through a [`ConfigManager`].
pub struct FileHighScoreStore<TConfigContentProvider = FileContentConfigProvider>
where
    TConfigContentProvider: ConfigContentProvider,
{
    manager: ConfigManager<TConfigContentProvider, HighScoreTable, YamlConfigSerializer>,
}

impl FileHighScoreStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }
}

impl<TConfigContentProvider> FileHighScoreStore<TConfigContentProvider>
where
    TConfigContentProvider: ConfigContentProvider,
{
    pub fn new(content_provider: TConfigContentProvider) -> Self {
        Self {
            manager: ConfigManager::new(content_provider, YamlConfigSerializer::new()),
        }
    }
}

impl<TConfigContentProvider> HighScoreStore for FileHighScoreStore<TConfigContentProvider>
where
    TConfigContentProvider: ConfigContentProvider + Send + 'static,
{
    fn get(&self, key: &str) -> u32 {
        match self.manager.get_config() {
            Ok(table) => table.scores.get(key).copied().unwrap_or(0),
            Err(e) => {
                log!("Failed to load high scores, starting from 0: {}", e);
                0
            }
        }
    }

    fn set(&self, key: &str, value: u32) {
        let mut table = self.manager.get_config().unwrap_or_else(|e| {
            log!("Failed to load high scores before saving, overwriting: {}", e);
            HighScoreTable::default()
        });
        table.scores.insert(key.to_string(), value);
        if let Err(e) = self.manager.set_config(&table) {
            log!("Failed to save high score {}={}: {}", key, value, e);
        }
    }
}
