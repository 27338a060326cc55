//! Parsed document type definitions
//!
//! Field names serialize in camelCase because the consumer is the web
//! admin's log viewer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content_item::ContentItem;

/// One turn in the captured conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Free-form role label (user, assistant, system, tool, ...)
    pub role: String,

    /// Normalized content, in source order
    pub content: Vec<ContentItem>,

    /// Message fields other than `role`/`content`; never an empty map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_props: Option<Map<String, Value>>,
}

impl Message {
    /// Build a message, collapsing an empty extras map to `None`
    pub fn new(
        role: impl Into<String>,
        content: Vec<ContentItem>,
        other_props: Map<String, Value>,
    ) -> Self {
        Self {
            role: role.into(),
            content,
            other_props: if other_props.is_empty() {
                None
            } else {
                Some(other_props)
            },
        }
    }

    /// Text items joined with newlines, images skipped
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentItem::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Structured form of one captured request/response log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// Request-level JSON fields except `messages`, in source order
    pub request_props: Map<String, Value>,

    /// Conversation messages, in source order
    pub messages: Vec<Message>,

    /// Trimmed response text, never JSON-parsed
    pub response: String,
}

impl ParsedDocument {
    /// True for the degraded document returned on parse failures
    pub fn is_empty(&self) -> bool {
        self.request_props.is_empty() && self.messages.is_empty() && self.response.is_empty()
    }
}
