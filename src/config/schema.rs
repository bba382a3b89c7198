use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::SortKey;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/hark/config.toml` or `~/.config/hark/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `HARK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            playback: PlaybackSettings::default(),
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Path to the show catalog JSON file. When unset, the default data
    /// directory is used.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Settle time between clearing the old source and loading the new one
    /// when switching tracks (milliseconds).
    pub switch_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { switch_delay_ms: 50 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Color theme the app starts in.
    pub theme: ThemeSetting,

    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Number of shows per page in the catalog view.
    pub page_size: usize,

    /// Initial catalog sort order.
    pub sort: SortKey,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: ThemeSetting::Dark,
            header_text: " ~ hark! podcasts in the terminal ~ ".to_string(),
            page_size: 10,
            sort: SortKey::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeSetting {
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 15 }
    }
}
