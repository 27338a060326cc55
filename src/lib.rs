// Completion Log Library
// Parses captured completion relay log entries into structured documents
// for the admin log viewer

pub mod models;
pub mod parsers;

pub use models::{ContentItem, CopyText, Message, ParsedDocument, Section, SectionKind};
pub use parsers::{parse_log_entry, LogEntryParser, LogMarkers, LogParser, ParseError};
