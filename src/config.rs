//! Persistent application configuration
//!
//! Stores the data file location and display preferences in a JSON file
//! at `<data_dir>/studentdesk/config.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_sidebar_open() -> bool {
    true
}

/// Persistent application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Student data file (None = `students.dat` in the working directory)
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Dark theme enabled
    #[serde(default)]
    pub dark_mode: bool,
    /// Navigation sidebar shown
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            dark_mode: false,
            sidebar_open: default_sidebar_open(),
        }
    }
}

impl AppConfig {
    /// Config file path: `<data_dir>/studentdesk/config.json`
    pub fn path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studentdesk")
            .join("config.json")
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded config from disk");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to disk, creating parent directories if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Config saved to disk");
        Ok(())
    }

    /// Student data file to open
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(studentdesk_core::DEFAULT_DATA_FILE))
    }
}
