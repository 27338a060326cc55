//! Copy-text serialization and display sections
//!
//! The log viewer renders a parsed document as a list of blocks, each with a
//! copy button. This module fixes what each block puts on the clipboard so
//! every renderer agrees.

use serde_json::{Map, Value};

use super::content_item::ContentItem;
use super::types::ParsedDocument;

/// Text placed on the clipboard for a block's value
pub trait CopyText {
    fn copy_text(&self) -> String;
}

/// Text items verbatim, images as `[Image: <url>]`, one per line
impl CopyText for [ContentItem] {
    fn copy_text(&self) -> String {
        self.iter()
            .map(|item| match item {
                ContentItem::Text { text } => text.clone(),
                ContentItem::Image { url } => format!("[Image: {}]", url),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pretty-printed JSON with two-space indentation
impl CopyText for Map<String, Value> {
    fn copy_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl CopyText for str {
    fn copy_text(&self) -> String {
        self.to_string()
    }
}

/// Kind of a display block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Request parameters (`requestProps`)
    Parameters,
    /// One conversation message
    Message,
    /// Extra fields of the preceding message
    OtherProps,
    /// Raw response text
    Response,
}

/// Borrowed value shown in a display block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionBody<'a> {
    Props(&'a Map<String, Value>),
    Content(&'a [ContentItem]),
    Text(&'a str),
}

/// One block of the rendered document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    /// Role for message blocks, otherwise a fixed label
    pub label: &'a str,
    pub body: SectionBody<'a>,
}

impl Section<'_> {
    pub fn copy_text(&self) -> String {
        match self.body {
            SectionBody::Props(props) => props.copy_text(),
            SectionBody::Content(items) => items.copy_text(),
            SectionBody::Text(text) => text.copy_text(),
        }
    }
}

impl ParsedDocument {
    /// Display blocks in render order.
    ///
    /// Parameters first, then each message followed by its extra fields,
    /// then the response. Empty parameter sets and empty responses produce
    /// no block.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections = Vec::with_capacity(self.messages.len() * 2 + 2);

        if !self.request_props.is_empty() {
            sections.push(Section {
                kind: SectionKind::Parameters,
                label: "parameters",
                body: SectionBody::Props(&self.request_props),
            });
        }

        for message in &self.messages {
            sections.push(Section {
                kind: SectionKind::Message,
                label: &message.role,
                body: SectionBody::Content(&message.content),
            });
            if let Some(props) = &message.other_props {
                sections.push(Section {
                    kind: SectionKind::OtherProps,
                    label: &message.role,
                    body: SectionBody::Props(props),
                });
            }
        }

        if !self.response.is_empty() {
            sections.push(Section {
                kind: SectionKind::Response,
                label: "response",
                body: SectionBody::Text(&self.response),
            });
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_content_copy_text() {
        let items = vec![
            ContentItem::text("first line"),
            ContentItem::image("https://example.com/cat.png"),
            ContentItem::text("last line"),
        ];
        assert_eq!(
            items.copy_text(),
            "first line\n[Image: https://example.com/cat.png]\nlast line"
        );
    }

    #[test]
    fn test_empty_content_copy_text() {
        let items: Vec<ContentItem> = Vec::new();
        assert_eq!(items.copy_text(), "");
    }

    #[test]
    fn test_props_copy_text_is_pretty_json() {
        let map = props(json!({"model": "gpt-4o", "stream": true}));
        assert_eq!(map.copy_text(), "{\n  \"model\": \"gpt-4o\",\n  \"stream\": true\n}");
    }

    #[test]
    fn test_str_copy_text() {
        assert_eq!("{\"id\":1}".copy_text(), "{\"id\":1}");
    }

    #[test]
    fn test_sections_order() {
        let doc = ParsedDocument {
            request_props: props(json!({"model": "x"})),
            messages: vec![
                Message::new("system", vec![ContentItem::text("be brief")], Map::new()),
                Message::new(
                    "tool",
                    vec![ContentItem::text("42")],
                    props(json!({"tool_call_id": "call_1"})),
                ),
            ],
            response: "done".to_string(),
        };

        let sections = doc.sections();
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Parameters,
                SectionKind::Message,
                SectionKind::Message,
                SectionKind::OtherProps,
                SectionKind::Response,
            ]
        );
        assert_eq!(sections[1].label, "system");
        assert_eq!(sections[3].label, "tool");
        assert_eq!(sections[3].copy_text(), "{\n  \"tool_call_id\": \"call_1\"\n}");
        assert_eq!(sections[4].copy_text(), "done");
    }

    #[test]
    fn test_sections_of_empty_document() {
        assert!(ParsedDocument::default().sections().is_empty());
    }
}
