//! Controllers layer - composition and coordination.
//!
//! This module contains the pieces that own state while the shell is mounted:
//! - Theme context
//! - Language context
//! - Root shell composition
//! - Client runtime (paint, hydrate, update queue)

pub mod language;
pub mod runtime;
pub mod shell;
pub mod theme;
