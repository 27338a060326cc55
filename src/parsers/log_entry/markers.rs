//! Log marker configuration
//!
//! The relay writes each captured exchange with fixed bracketed markers.
//! Older entries prefix each conversation turn with a role marker line:
//!
//! ```text
//! 【系统】：You are a helpful assistant.
//! 【用户】：Describe this picture
//! 【参数】：{"model":"gpt-4o","temperature":0.7}
//! 【AI】：It is a cat.
//! ```
//!
//! Newer entries carry the whole request body as JSON:
//!
//! ```text
//! 【Request Body】:{"model":"gpt-4o","messages":[...]}
//! 【Response Body】:{"id":"chatcmpl-1",...}
//! ```

use serde::{Deserialize, Serialize};

use crate::parsers::ParseError;

/// Marker that opens the request JSON
pub const REQUEST_BODY_MARKER: &str = "【Request Body】:";

/// Marker that opens the response text
pub const RESPONSE_BODY_MARKER: &str = "【Response Body】:";

/// Label of the role block holding request parameters
pub const PARAMETERS_LABEL: &str = "parameters";

/// Line prefix that opens a role block, and the role it assigns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMarker {
    pub prefix: String,
    pub label: String,
}

impl RoleMarker {
    pub fn new(prefix: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            label: label.into(),
        }
    }
}

/// Marker set used to segment captured log entries
///
/// Missing fields fall back to the relay's defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogMarkers {
    /// Sentinel that precedes the request JSON
    pub request_body: String,
    /// Sentinel that precedes the response text; the last occurrence wins
    pub response_body: String,
    /// Line prefixes for role-block entries
    pub role_markers: Vec<RoleMarker>,
    /// Role-marker label whose block holds the request JSON
    pub parameters_label: String,
}

impl Default for LogMarkers {
    fn default() -> Self {
        Self {
            request_body: REQUEST_BODY_MARKER.to_string(),
            response_body: RESPONSE_BODY_MARKER.to_string(),
            role_markers: vec![
                RoleMarker::new("【系统】：", "system"),
                RoleMarker::new("【用户】：", "user"),
                RoleMarker::new("【AI】：", "assistant"),
                RoleMarker::new("【参数】：", PARAMETERS_LABEL),
            ],
            parameters_label: PARAMETERS_LABEL.to_string(),
        }
    }
}

impl LogMarkers {
    /// Load a marker set from JSON, e.g. a host-provided override
    ///
    /// Empty marker strings are rejected: they would match every line.
    pub fn from_json(content: &str) -> Result<Self, ParseError> {
        let markers: Self = serde_json::from_str(content)?;

        if markers.request_body.is_empty() || markers.response_body.is_empty() {
            return Err(ParseError::invalid_json("body markers must not be empty"));
        }
        if markers.role_markers.iter().any(|m| m.prefix.is_empty()) {
            return Err(ParseError::invalid_json("role marker prefix must not be empty"));
        }

        Ok(markers)
    }

    /// Match a line against the role markers
    ///
    /// Returns the marker's label and the rest of the line after the prefix.
    pub fn role_for_line<'a>(&'a self, line: &'a str) -> Option<(&'a str, &'a str)> {
        self.role_markers.iter().find_map(|marker| {
            line.strip_prefix(marker.prefix.as_str())
                .map(|rest| (marker.label.as_str(), rest))
        })
    }

    pub fn is_parameters_label(&self, label: &str) -> bool {
        label == self.parameters_label
    }
}
