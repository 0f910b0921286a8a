//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Theme preference and theme provider configuration
//! - Locales
//! - Document metadata and font descriptors
//! - Shell settings
//! - Event types for the client update queue

pub mod fonts;
pub mod locale;
pub mod messages;
pub mod metadata;
pub mod settings;
pub mod theme;

pub use fonts::{FontDisplay, FontFamily, FontSource, FontStyle};
pub use locale::Locale;
pub use messages::ShellEvent;
pub use metadata::DocumentMetadata;
pub use settings::ShellSettings;
pub use theme::{ResolvedTheme, ThemeAttribute, ThemeConfig, ThemePreference};
