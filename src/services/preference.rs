// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use super::settings::SettingsStore;
use crate::error::Result;

pub const GITMOJI_KEY: &str = "gitmojiEnabled";
pub const SCOPE_KEY: &str = "scope";

/// Types a [`Preference`] can hold
pub trait PreferenceValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn load(store: &dyn SettingsStore, key: &str, default: &Self) -> Self;
    fn save(store: &dyn SettingsStore, key: &str, value: &Self) -> Result<()>;
}

impl PreferenceValue for bool {
    fn load(store: &dyn SettingsStore, key: &str, default: &Self) -> Self {
        store.get_bool(key, *default)
    }

    fn save(store: &dyn SettingsStore, key: &str, value: &Self) -> Result<()> {
        store.set_bool(key, *value)
    }
}

impl PreferenceValue for String {
    fn load(store: &dyn SettingsStore, key: &str, default: &Self) -> Self {
        store.get_string(key, default)
    }

    fn save(store: &dyn SettingsStore, key: &str, value: &Self) -> Result<()> {
        store.set_string(key, value)
    }
}

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Notification state for one key of one store
struct Channel<T> {
    // serializes compare-and-write against subscription replay
    write_guard: Mutex<()>,
    listeners: Mutex<Listeners<T>>,
}

impl<T> Channel<T> {
    fn new() -> Self {
        Self {
            write_guard: Mutex::new(()),
            listeners: Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners<T>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A persisted value with change notification.
///
/// Writes that do not change the stored value are dropped without touching
/// the store or notifying anyone. Every `Preference` opened for the same key
/// of the same store shares one listener list, so a write through any of
/// them reaches all subscribers.
pub struct Preference<T: PreferenceValue> {
    store: Arc<dyn SettingsStore>,
    key: &'static str,
    default: T,
    channel: Arc<Channel<T>>,
}

pub type GitmojiPreference = Preference<bool>;
pub type ScopePreference = Preference<String>;

impl Preference<bool> {
    pub fn gitmoji(store: Arc<dyn SettingsStore>) -> Self {
        Self::new(store, GITMOJI_KEY, false)
    }
}

impl Preference<String> {
    pub fn scope(store: Arc<dyn SettingsStore>) -> Self {
        Self::new(store, SCOPE_KEY, String::new())
    }
}

impl<T: PreferenceValue> Preference<T> {
    pub fn new(store: Arc<dyn SettingsStore>, key: &'static str, default: T) -> Self {
        let channel = store.registry().slot(key, Channel::<T>::new);
        Self {
            store,
            key,
            default,
            channel,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn read(&self) -> T {
        T::load(self.store.as_ref(), self.key, &self.default)
    }

    /// Persist `value` and notify subscribers. Returns whether it changed.
    ///
    /// Listeners run on the writing thread, in write order.
    pub fn write(&self, value: T) -> Result<bool> {
        let _guard = self
            .channel
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.read() == value {
            return Ok(false);
        }
        T::save(self.store.as_ref(), self.key, &value)?;

        debug!(key = self.key, value = ?value, "preference changed");

        // Snapshot so a listener may drop its own subscription
        let listeners: Vec<Listener<T>> = self
            .channel
            .listeners()
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&value);
        }

        Ok(true)
    }

    /// Register `listener`; it is called right away with the current value.
    ///
    /// Listeners must not write or subscribe to this same preference.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);

        let _guard = self
            .channel
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = {
            let mut listeners = self.channel.listeners();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::clone(&listener)));
            id
        };

        listener(&self.read());

        let weak: Weak<Channel<T>> = Arc::downgrade(&self.channel);
        Subscription::new(move || {
            if let Some(channel) = weak.upgrade() {
                channel
                    .listeners()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.listeners().entries.len()
    }
}

impl<T: PreferenceValue> Clone for Preference<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            default: self.default.clone(),
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<T: PreferenceValue> fmt::Debug for Preference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preference")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle returned by [`Preference::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
