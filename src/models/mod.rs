//! Completion log data models
//!
//! This module defines the structured document produced from a captured
//! completion log entry.

pub mod document;

pub use document::*;
