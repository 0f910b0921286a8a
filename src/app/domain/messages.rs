use super::locale::Locale;
use super::theme::{ResolvedTheme, ThemePreference};

/// Updates the client runtime processes, one at a time, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    // User interaction
    SetTheme(ThemePreference),
    SetLocale(Locale),

    // Environment signals
    SystemThemeChanged(ResolvedTheme),
    /// Another client instance wrote to shared storage.
    StorageChanged { key: String, value: Option<String> },
}
