//! Configuration handling for the TUI

use crate::state::{TabNavigation, ThemeMode};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var that overrides the form store location
pub const STORE_PATH_ENV: &str = "BIOMETRICOS_STORE_PATH";

/// Columns below which the page switches to the narrow layout
pub const DEFAULT_NARROW_BREAKPOINT: u16 = 100;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Form store file
    pub store_path: Option<PathBuf>,
    /// Terminal width below which the narrow layout is used
    pub narrow_breakpoint: Option<u16>,
    /// How long toasts stay on screen
    pub toast_duration_ms: Option<u64>,
    /// Tab navigation mode: "section", "route" or "query"
    pub tab_mode: Option<String>,
    /// "dark" or "light"
    pub theme: Option<String>,
    /// Append submitted packages to this JSON-lines file
    pub outbox_path: Option<PathBuf>,
    /// Show placeholder previews in empty image slots
    pub show_mock_images: Option<bool>,
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("mx", "biometricos", "biometricos-tui")
}

/// Default config file path
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Log file; the terminal is owned by the UI
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("biometricos-tui.log"))
}

impl TuiConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Store location: env override, then config, then `None` for the
    /// platform default.
    pub fn resolve_store_path(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.store_path.clone())
    }

    pub fn narrow_breakpoint(&self) -> u16 {
        self.narrow_breakpoint.unwrap_or(DEFAULT_NARROW_BREAKPOINT)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS))
    }

    pub fn tab_navigation(&self) -> TabNavigation {
        match self.tab_mode.as_deref() {
            Some("route") => TabNavigation::Route {
                base_path: Some("/verificacion".to_string()),
            },
            Some("query") => TabNavigation::Query {
                param: "tab".to_string(),
            },
            Some("section") | None => TabNavigation::Section,
            Some(other) => {
                tracing::warn!(mode = other, "unknown tab_mode, using section");
                TabNavigation::Section
            }
        }
    }

    pub fn theme(&self) -> ThemeMode {
        match self.theme.as_deref() {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = Some(mode.as_str().to_string());
    }

    pub fn show_mock_images(&self) -> bool {
        self.show_mock_images.unwrap_or(true)
    }
}
