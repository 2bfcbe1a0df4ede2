//! Session token and UI preference accessors over a `KeyValueStore`.
//!
//! The token is the only process-wide mutable state the client has. It is
//! set at login, read before every request and cleared on logout or 401;
//! everything goes through `SessionStore` so the interceptor can be tested
//! against an in-memory store.

use std::sync::Arc;

use crate::error::ApiError;
use crate::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const THEME_COLOR_KEY: &str = "themeColor";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const DEFAULT_THEME_COLOR: &str = "#646cff";

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The current token, if any. Blank values count as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), ApiError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<(), ApiError> {
        self.store.remove(TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::load(self.store.as_ref())
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<(), ApiError> {
        prefs.save(self.store.as_ref())
    }
}

/// Theme settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub theme_color: String,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            dark_mode: false,
        }
    }
}

impl Preferences {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            theme_color: store
                .get(THEME_COLOR_KEY)
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.theme_color),
            dark_mode: store
                .get(DARK_MODE_KEY)
                .map(|v| v == "true")
                .unwrap_or(defaults.dark_mode),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), ApiError> {
        store.set(THEME_COLOR_KEY, &self.theme_color)?;
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    /// Parse `theme_color` (`#rgb` or `#rrggbb`) into its channels.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.theme_color.strip_prefix('#')?;
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}
