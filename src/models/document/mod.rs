//! Parsed log document models
//!
//! Defines the ParsedDocument structure produced from one captured
//! completion log entry, and the helpers a log viewer needs to display it.

mod clipboard;
mod content_item;
mod types;

// Re-export all public types
pub use clipboard::{CopyText, Section, SectionBody, SectionKind};
pub use content_item::ContentItem;
pub use types::{Message, ParsedDocument};
