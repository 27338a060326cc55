//! Log parsers for captured completion exchanges
//!
//! Converts relay log entries describing one completion request/response
//! into the ParsedDocument format consumed by the log viewer.

mod error;
pub mod log_entry;

pub use error::ParseError;
pub use log_entry::{LogEntryParser, LogMarkers};

use crate::models::ParsedDocument;

/// Trait for parsing captured log text into a ParsedDocument
pub trait LogParser {
    /// Parse log content from a string
    fn parse_string(&self, content: &str) -> Result<ParsedDocument, ParseError>;
}

/// Parse a log entry with the default markers, never failing
///
/// Failures are logged and yield an empty document.
pub fn parse_log_entry(content: &str) -> ParsedDocument {
    LogEntryParser::new().parse(content)
}
