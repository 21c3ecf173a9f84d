//! Light/dark theme preference, kept outside the rendering pipeline.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage key the preference is saved under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for stored values that name no theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

// ============================================================================
// Seams
// ============================================================================

/// Key-value storage for the preference.
pub trait ThemeStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// Whatever displays the theme, e.g. a document root's class list.
pub trait ThemeTarget {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl ThemeStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

// ============================================================================
// ThemeState
// ============================================================================

/// The active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    theme: Theme,
}

impl ThemeState {
    /// Loads the stored preference. Missing or unknown values mean dark.
    pub fn init(store: &impl ThemeStore) -> Self {
        let theme = store
            .load(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists the new value.
    pub fn toggle(&mut self, store: &mut impl ThemeStore) -> Theme {
        self.theme = self.theme.toggled();
        store.save(THEME_KEY, self.theme.as_str());
        self.theme
    }

    /// Marks `target` with the active theme's class and clears the other.
    pub fn apply(&self, target: &mut impl ThemeTarget) {
        target.remove_class(self.theme.toggled().as_str());
        target.add_class(self.theme.as_str());
    }
}
