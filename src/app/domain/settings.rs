use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::metadata::DocumentMetadata;
use super::theme::ThemeConfig;
use crate::app::infrastructure::error::ShellError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Directory the local font descriptors are resolved against.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    /// Directory holding `<locale>.json` message catalogs.
    #[serde(default = "default_messages_dir")]
    pub messages_dir: PathBuf,

    /// Overrides for the built-in document metadata.
    #[serde(default)]
    pub metadata: DocumentMetadata,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("assets/fonts")
}

fn default_messages_dir() -> PathBuf {
    PathBuf::from("messages")
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            messages_dir: default_messages_dir(),
            metadata: DocumentMetadata::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl ShellSettings {
    /// Load settings from the default location, or defaults if missing
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load settings from `path`. A missing file yields defaults; a malformed
    /// one is reported and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ShellError> {
        Ok(toml::from_str(contents)?)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ShellError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| ShellError::Settings(e.to_string()))?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("deepwiki-shell");
        path.push("settings.toml");
        path
    }

    /// Resolve relative directories against the directory holding the settings file.
    pub fn rebased(mut self, base: &Path) -> Self {
        if self.fonts_dir.is_relative() {
            self.fonts_dir = base.join(&self.fonts_dir);
        }
        if self.messages_dir.is_relative() {
            self.messages_dir = base.join(&self.messages_dir);
        }
        self
    }
}
