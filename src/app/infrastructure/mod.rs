//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Markup tree and HTML serialization
//! - Client preference storage
//! - Platform-specific detection
//! - Error types

pub mod error;
pub mod markup;
pub mod platform;
pub mod storage;
