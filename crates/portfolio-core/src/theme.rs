//! Persisted light/dark preference.
//!
//! Storage is best-effort: an unavailable or misbehaving store never
//! surfaces an error, the preference just falls back to [`Theme::Light`].

use crate::constants::THEME_STORAGE_KEY;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Class set on the document root while this theme is active.
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }

    pub fn toggled(self) -> Self {
        Theme::from_dark(!self.is_dark())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage rejected the operation: {0}")]
    Rejected(String),
}

/// Minimal string key/value store (browser `localStorage` in production).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store; `failing()` builds one that refuses every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemePreference<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Load the stored preference.
    ///
    /// `system_prefers_dark` is consulted only when the store works but holds
    /// no value; any store failure or garbage value yields light.
    pub fn load(store: S, system_prefers_dark: Option<bool>) -> Self {
        let current = match store.load(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("ignoring unrecognised theme preference {:?}", raw);
                Theme::Light
            }),
            Ok(None) => Theme::from_dark(system_prefers_dark.unwrap_or(false)),
            Err(e) => {
                log::warn!("theme preference not loaded: {e}");
                Theme::Light
            }
        };
        Self { store, current }
    }

    /// `true` when dark.
    pub fn get(&self) -> bool {
        self.current.is_dark()
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, dark: bool) {
        self.current = Theme::from_dark(dark);
        if let Err(e) = self.store.save(THEME_STORAGE_KEY, self.current.as_str()) {
            log::warn!("theme preference not saved: {e}");
        }
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(!self.get());
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
