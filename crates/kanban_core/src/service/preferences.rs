//! Persisted chrome flags (sidebar visibility, theme).
//!
//! Only the stored values live here; showing/hiding and theming are the
//! UI layer's job.

use crate::repo::kv_store::{KeyValueStore, StorageResult};
use crate::repo::storage_adapter::{StorageAdapter, SHOW_SIDEBAR_KEY, THEME_KEY};

/// Color theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Snapshot of the chrome flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub sidebar_visible: bool,
    pub theme: Theme,
}

impl Preferences {
    /// Reads both flags; unknown or missing values use the defaults
    /// (sidebar shown, dark theme).
    pub fn load<S: KeyValueStore>(storage: &StorageAdapter<S>) -> StorageResult<Self> {
        let sidebar_visible = storage.load_scalar(SHOW_SIDEBAR_KEY)?.as_deref() != Some("false");
        let theme = storage
            .load_scalar(THEME_KEY)?
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();
        Ok(Self {
            sidebar_visible,
            theme,
        })
    }
}

pub fn set_sidebar_visible<S: KeyValueStore>(
    storage: &StorageAdapter<S>,
    visible: bool,
) -> StorageResult<()> {
    storage.save_scalar(SHOW_SIDEBAR_KEY, if visible { "true" } else { "false" })
}

pub fn set_theme<S: KeyValueStore>(storage: &StorageAdapter<S>, theme: Theme) -> StorageResult<()> {
    storage.save_scalar(THEME_KEY, theme.as_str())
}
