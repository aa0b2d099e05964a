// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Key/value persistence for user preferences.
///
/// Keys are plain field names; the store does no namespacing.
pub trait SettingsStore: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn set_bool(&self, key: &str, value: bool) -> Result<()>;
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Per-key state shared by every accessor opened over this store
    fn registry(&self) -> &KeyRegistry;
}

/// Type-erased slots, one per key, owned by a store.
///
/// Every `Preference` for the same key of the same store resolves to the
/// same slot, so change notification follows the key rather than the handle.
#[derive(Default)]
pub struct KeyRegistry {
    slots: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl KeyRegistry {
    /// Slot for `key`, created with `init` on first use.
    ///
    /// A slot of a different type under the same key is replaced.
    pub fn slot<S: Any + Send + Sync>(&self, key: &str, init: impl FnOnce() -> S) -> Arc<S> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slots.get(key) {
            if let Ok(slot) = Arc::clone(existing).downcast::<S>() {
                return slot;
            }
            debug!(key, "replacing registry slot of another type");
        }

        let slot = Arc::new(init());
        slots.insert(key.to_string(), Arc::clone(&slot) as Arc<dyn Any + Send + Sync>);
        slot
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistry").field("keys", &self.len()).finish()
    }
}

fn read_bool(table: &Table, key: &str, default: bool) -> bool {
    match table.get(key) {
        Some(Value::Boolean(b)) => *b,
        Some(other) => {
            debug!(key, found = other.type_str(), "ignoring non-boolean setting");
            default
        }
        None => default,
    }
}

fn read_string(table: &Table, key: &str, default: &str) -> String {
    match table.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            debug!(key, found = other.type_str(), "ignoring non-string setting");
            default.to_string()
        }
        None => default.to_string(),
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<Table>,
    registry: KeyRegistry,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        read_bool(&values, key, default)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), Value::Boolean(value));
        Ok(())
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        read_string(&values, key, default)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn registry(&self) -> &KeyRegistry {
        &self.registry
    }
}

/// TOML-file backed store, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<Table>,
    registry: KeyRegistry,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Table>(&content).map_err(|e| {
                Error::Settings(format!("cannot parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = values.len(), "settings opened");

        Ok(Self {
            path,
            values: RwLock::new(values),
            registry: KeyRegistry::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let previous = values.insert(key.to_string(), value);

        if let Err(e) = self.persist(&values) {
            // Keep memory and disk in agreement
            match previous {
                Some(v) => values.insert(key.to_string(), v),
                None => values.remove(key),
            };
            return Err(e);
        }

        debug!(key, path = %self.path.display(), "setting persisted");
        Ok(())
    }

    fn persist(&self, values: &Table) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string(values)
            .map_err(|e| Error::Settings(format!("cannot serialize settings: {}", e)))?;

        // Write to temp file first, then rename (atomic)
        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        read_bool(&values, key, default)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, Value::Boolean(value))
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        read_string(&values, key, default)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, Value::String(value.to_string()))
    }

    fn registry(&self) -> &KeyRegistry {
        &self.registry
    }
}
