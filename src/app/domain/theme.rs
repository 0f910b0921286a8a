use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app::infrastructure::error::ShellError;

/// Theme preference as chosen by the user (or the configured default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn all() -> &'static [ThemePreference] {
        &[Self::System, Self::Light, Self::Dark]
    }

    /// Explicit preferences map straight to a resolved theme; `System` needs the OS signal.
    pub fn explicit(&self) -> Option<ResolvedTheme> {
        match self {
            Self::System => None,
            Self::Light => Some(ResolvedTheme::Light),
            Self::Dark => Some(ResolvedTheme::Dark),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ShellError::UnknownTheme(other.to_string())),
        }
    }
}

/// The color scheme that actually lands on the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolvedTheme {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ThemePreference::from_str(s)? {
            ThemePreference::Light => Ok(Self::Light),
            ThemePreference::Dark => Ok(Self::Dark),
            ThemePreference::System => Err(ShellError::UnknownTheme(s.to_string())),
        }
    }
}

/// Which root-element attribute the theme provider mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAttribute {
    /// Toggle `light`/`dark` in the class list.
    Class,
    /// Set a `data-*` attribute to the resolved theme.
    Data(String),
}

impl ThemeAttribute {
    pub fn parse(raw: &str) -> Result<Self, ShellError> {
        let raw = raw.trim();
        if raw == "class" {
            return Ok(Self::Class);
        }
        let valid = raw
            .strip_prefix("data-")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        if valid {
            Ok(Self::Data(raw.to_string()))
        } else {
            Err(ShellError::InvalidThemeAttribute(raw.to_string()))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Class => "class",
            Self::Data(name) => name,
        }
    }
}

impl Default for ThemeAttribute {
    fn default() -> Self {
        Self::Data("data-theme".to_string())
    }
}

impl Serialize for ThemeAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ThemeAttribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Configuration record handed to the theme provider by the root shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub attribute: ThemeAttribute,

    #[serde(default = "default_theme")]
    pub default_theme: ThemePreference,

    #[serde(default = "default_enable_system")]
    pub enable_system: bool,

    /// Client storage key holding the persisted preference.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Also emit `color-scheme` on the root element so native controls follow.
    #[serde(default = "default_enable_color_scheme")]
    pub enable_color_scheme: bool,

    #[serde(default)]
    pub forced_theme: Option<ResolvedTheme>,
}

fn default_theme() -> ThemePreference {
    ThemePreference::System
}

fn default_enable_system() -> bool {
    true
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_enable_color_scheme() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            attribute: ThemeAttribute::default(),
            default_theme: default_theme(),
            enable_system: default_enable_system(),
            storage_key: default_storage_key(),
            enable_color_scheme: default_enable_color_scheme(),
            forced_theme: None,
        }
    }
}

impl ThemeConfig {
    /// Resolve a preference against the OS signal under this config.
    ///
    /// `System` without system tracking (or without a signal) falls back to light.
    pub fn resolve(&self, preference: ThemePreference, system: Option<ResolvedTheme>) -> ResolvedTheme {
        if let Some(forced) = self.forced_theme {
            return forced;
        }
        match preference.explicit() {
            Some(theme) => theme,
            None if self.enable_system => system.unwrap_or(ResolvedTheme::Light),
            None => ResolvedTheme::Light,
        }
    }

    /// Parse a stored value, dropping `system` when system tracking is off.
    /// Stored values match exactly, the same way the pre-paint script reads them.
    pub fn accepts(&self, raw: &str) -> Option<ThemePreference> {
        let preference = ThemePreference::all().iter().copied().find(|p| p.as_str() == raw)?;
        if preference == ThemePreference::System && !self.enable_system {
            return None;
        }
        Some(preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ThemeConfig::default();
        assert_eq!(config.attribute.name(), "data-theme");
        assert_eq!(config.default_theme, ThemePreference::System);
        assert!(config.enable_system);
        assert_eq!(config.storage_key, "theme");
        assert!(config.enable_color_scheme);
        assert!(config.forced_theme.is_none());
    }

    #[test]
    fn test_attribute_parse() {
        assert_eq!(ThemeAttribute::parse("class").unwrap(), ThemeAttribute::Class);
        assert_eq!(
            ThemeAttribute::parse("data-mode").unwrap(),
            ThemeAttribute::Data("data-mode".to_string())
        );
        assert!(ThemeAttribute::parse("theme").is_err());
        assert!(ThemeAttribute::parse("data-").is_err());
        assert!(ThemeAttribute::parse("data-Theme").is_err());
    }

    #[test]
    fn test_resolve() {
        let config = ThemeConfig::default();
        assert_eq!(config.resolve(ThemePreference::Dark, Some(ResolvedTheme::Light)), ResolvedTheme::Dark);
        assert_eq!(config.resolve(ThemePreference::System, Some(ResolvedTheme::Dark)), ResolvedTheme::Dark);
        assert_eq!(config.resolve(ThemePreference::System, None), ResolvedTheme::Light);

        let no_system = ThemeConfig { enable_system: false, ..Default::default() };
        assert_eq!(no_system.resolve(ThemePreference::System, Some(ResolvedTheme::Dark)), ResolvedTheme::Light);

        let forced = ThemeConfig { forced_theme: Some(ResolvedTheme::Dark), ..Default::default() };
        assert_eq!(forced.resolve(ThemePreference::Light, None), ResolvedTheme::Dark);
    }

    #[test]
    fn test_accepts() {
        let config = ThemeConfig::default();
        assert_eq!(config.accepts("dark"), Some(ThemePreference::Dark));
        assert_eq!(config.accepts(" Light "), None);
        assert_eq!(config.accepts("Dark"), None);
        assert_eq!(config.accepts("system"), Some(ThemePreference::System));
        assert_eq!(config.accepts("sepia"), None);

        let no_system = ThemeConfig { enable_system: false, ..Default::default() };
        assert_eq!(no_system.accepts("system"), None);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_src = r#"
            attribute = "class"
            default_theme = "dark"
        "#;
        let config: ThemeConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.attribute, ThemeAttribute::Class);
        assert_eq!(config.default_theme, ThemePreference::Dark);
        assert!(config.enable_system);

        let bad: Result<ThemeConfig, _> = toml::from_str(r#"attribute = "style""#);
        assert!(bad.is_err());
    }
}
