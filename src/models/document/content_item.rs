//! Content item type
//!
//! The canonical unit of message content after normalization. Every content
//! encoding found in a captured request collapses into one of these.

use serde::{Deserialize, Serialize};

/// One atomic piece of message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Plain text, trimmed of surrounding whitespace
    Text { text: String },

    /// Image reference (http(s) URL or data URI)
    Image { url: String },
}

impl ContentItem {
    /// Create a text item, trimming the payload
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::Text {
            text: text.as_ref().trim().to_string(),
        }
    }

    /// Create an image item
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Image { url } => Some(url),
            Self::Text { .. } => None,
        }
    }
}
