//! Services layer - rendering support operations.
//!
//! This module contains the operations the shell and runtime build on:
//! - Local font resolution and tokens
//! - Pre-paint theme script
//! - Message catalogs and interpolation
//! - Hydration comparison

pub mod font_loader;
pub mod hydration;
pub mod i18n;
pub mod theme_script;
