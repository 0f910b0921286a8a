//! Root shell for the DeepWiki frontend: bundled fonts, a theme context and a
//! language context around every rendered page, with a client runtime that
//! paints, hydrates and applies updates without hydration mismatches.

pub mod app;

pub use app::*;
