//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (theme, locale, fonts, metadata, settings, events)
//! - `controllers/` - Orchestration (theme and language contexts, root shell, client runtime)
//! - `services/` - Operations (font loading, theme script, i18n, hydration comparison)
//! - `infrastructure/` - Markup tree, storage, platform detection, errors
//! - `site.rs` - Build-time site definition
//! - `pages.rs` - Page content rendered inside the shell

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod pages;
pub mod services;
pub mod site;

// Re-exports for convenient external access
pub use controllers::language::{LANGUAGE_STORAGE_KEY, LanguageContext, LanguageProvider};
pub use controllers::runtime::{ClientEnvironment, ClientRuntime, Phase};
pub use controllers::shell::{Page, RenderPass, RenderScope, RootShell};
pub use controllers::theme::{ThemeContext, ThemeProvider};
pub use domain::{
    DocumentMetadata, FontFamily, Locale, ResolvedTheme, ShellEvent, ShellSettings, ThemeAttribute, ThemeConfig,
    ThemePreference,
};
pub use infrastructure::error::{Result, ShellError};
pub use infrastructure::markup::{Document, Element, Node};
pub use infrastructure::platform::{detect_preferred_languages, detect_system_theme};
pub use infrastructure::storage::{FileStorage, MemoryStorage, PreferenceStore};
pub use pages::MarkdownPage;
pub use services::hydration::HydrationReport;
pub use services::i18n::{Catalog, Translations};
