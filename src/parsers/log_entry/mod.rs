//! Captured completion log parser
//!
//! Parses one log entry written by the relay for a completion request into
//! a ParsedDocument. Two entry shapes are supported:
//!
//! - Request Body / Response Body entries, carrying the request as JSON
//! - Older role-marker entries, one `【角色】：` prefixed block per turn
//!
//! ## Supported Features
//!
//! - Request parameters with the `messages` array peeled off
//! - String and array content, text and `image_url` parts
//! - Unknown parts and message fields preserved instead of dropped
//! - Raw response passthrough

pub mod markers;
pub mod normalizer;
pub mod segmenter;
pub mod types;

use log::{debug, warn};

use super::{LogParser, ParseError};
use crate::models::ParsedDocument;

pub use markers::{LogMarkers, RoleMarker, REQUEST_BODY_MARKER, RESPONSE_BODY_MARKER};
pub use segmenter::{detect_format, segment, LogFormat, RawBlock, Segments};

/// Content part types mapped to dedicated content items
pub const SUPPORTED_CONTENT_TYPES: &[&str] = &["text", "image_url"];

/// Maximum JSON size echoed into debug logs (1KB)
const MAX_LOGGED_JSON_SIZE: usize = 1024;

/// Parser for captured completion log entries
///
/// Stateless apart from its marker set; one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct LogEntryParser {
    markers: LogMarkers,
}

impl LogEntryParser {
    /// Create a parser with the relay's default markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom marker set
    pub fn with_markers(markers: LogMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &LogMarkers {
        &self.markers
    }

    /// Parse a log entry, reporting why it failed
    pub fn try_parse(&self, content: &str) -> Result<ParsedDocument, ParseError> {
        match segment(content, &self.markers)? {
            Segments::RequestResponse { request, response } => {
                normalizer::from_request_response(request, response, &self.markers)
            }
            Segments::RoleBlocks(blocks) => normalizer::from_role_blocks(blocks, &self.markers),
        }
    }

    /// Parse a log entry, degrading any failure to an empty document
    ///
    /// The failure cause is logged; the caller always gets a well-formed
    /// document.
    pub fn parse(&self, content: &str) -> ParsedDocument {
        match self.try_parse(content) {
            Ok(document) => document,
            Err(e) if e.is_empty_input() => {
                debug!("Empty log entry");
                ParsedDocument::default()
            }
            Err(e) => {
                warn!("解析日志内容时出错: {}", e);
                ParsedDocument::default()
            }
        }
    }
}

impl LogParser for LogEntryParser {
    fn parse_string(&self, content: &str) -> Result<ParsedDocument, ParseError> {
        self.try_parse(content)
    }
}
