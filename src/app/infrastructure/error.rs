use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Font asset not found: {}", path.display())]
    FontAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font descriptor error: {0}")]
    FontDescriptor(String),

    #[error("Invalid theme attribute '{0}': expected \"class\" or a data-* attribute")]
    InvalidThemeAttribute(String),

    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with ShellError
pub type Result<T> = std::result::Result<T, ShellError>;
