//! Structural normalization of segmented log text
//!
//! Parses the embedded request JSON and folds every content encoding into
//! the canonical `ContentItem` form. Both entry shapes go through the same
//! content rule.

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::markers::LogMarkers;
use super::segmenter::RawBlock;
use super::types::{compact_json, RawContent, RawContentItem, RawMessageEntry, RawRequest, TypedPart};
use super::{MAX_LOGGED_JSON_SIZE, SUPPORTED_CONTENT_TYPES};
use crate::models::{ContentItem, Message, ParsedDocument};
use crate::parsers::ParseError;

/// Build a document from a Request Body / Response Body entry
pub fn from_request_response(
    request_part: &str,
    response: &str,
    markers: &LogMarkers,
) -> Result<ParsedDocument, ParseError> {
    let body = extract_request_body(request_part, markers)?;
    let (request_props, messages) = normalize_request(parse_request_body(body)?);

    Ok(ParsedDocument {
        request_props,
        messages,
        response: response.trim().to_string(),
    })
}

/// Build a document from role-marker blocks
///
/// The parameters block supplies the request JSON. With more than one block,
/// the last one is the response unless it is the parameters block. The other
/// blocks are conversation turns, used only when the parameters JSON carries
/// no messages of its own.
pub fn from_role_blocks(
    mut blocks: Vec<RawBlock>,
    markers: &LogMarkers,
) -> Result<ParsedDocument, ParseError> {
    let has_response = blocks.len() > 1
        && blocks
            .last()
            .is_some_and(|last| !markers.is_parameters_label(&last.role));
    let response = if has_response {
        blocks
            .pop()
            .map(|block| block.content.trim().to_string())
            .unwrap_or_default()
    } else {
        String::new()
    };

    let mut request_props = Map::new();
    let mut request_messages = Vec::new();
    let mut block_messages = Vec::new();

    for block in blocks {
        if markers.is_parameters_label(&block.role) {
            let body = block.content.trim();
            if body.is_empty() {
                debug!("Skipping empty parameters block");
                continue;
            }
            let (props, messages) = normalize_request(parse_request_body(body)?);
            request_props.extend(props);
            request_messages.extend(messages);
        } else {
            let content = normalize_content(Some(RawContent::Text(block.content)));
            block_messages.push(Message::new(block.role, content, Map::new()));
        }
    }

    let messages = if request_messages.is_empty() {
        block_messages
    } else {
        request_messages
    };

    Ok(ParsedDocument {
        request_props,
        messages,
        response,
    })
}

/// Text after the first request body marker, trimmed and non-blank
fn extract_request_body<'a>(request_part: &'a str, markers: &LogMarkers) -> Result<&'a str, ParseError> {
    let marker = markers.request_body.as_str();
    request_part
        .find(marker)
        .map(|index| request_part[index + marker.len()..].trim())
        .filter(|body| !body.is_empty())
        .ok_or(ParseError::MissingRequestBody)
}

/// Parse the leading JSON object of a request body
///
/// Only the first JSON value is read, so log lines the relay appends after
/// the body do not break parsing. Nesting depth is unbounded; the stack grows
/// on demand while the value is read.
pub fn parse_request_body(body: &str) -> Result<RawRequest, ParseError> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;

    match value {
        Value::Object(request) => Ok(RawRequest::from_map(request)),
        other => Err(ParseError::invalid_json(format!(
            "请求体不是 JSON 对象: {}",
            truncate_for_log(&other.to_string())
        ))),
    }
}

/// Split a request into its props and normalized messages
pub fn normalize_request(request: RawRequest) -> (Map<String, Value>, Vec<Message>) {
    let messages = request
        .messages
        .map(|messages| messages.into_entries())
        .unwrap_or_default()
        .into_iter()
        .map(normalize_message)
        .collect();

    (request.props, messages)
}

fn normalize_message(entry: RawMessageEntry) -> Message {
    match entry {
        RawMessageEntry::Object(message) => {
            let role = message.role_label();
            Message::new(role, normalize_content(message.content), message.extra)
        }
        RawMessageEntry::Other(value) => {
            debug!("Message entry is not an object: {}", truncate_for_log(&value.to_string()));
            let content = match value {
                Value::Array(_) => Some(RawContent::Other(value)),
                value => RawContent::from_value(value),
            };
            Message::new(String::new(), normalize_content(content), Map::new())
        }
    }
}

/// Normalize message content into ordered content items
///
/// Arrays map item by item; a string becomes one trimmed text item; missing
/// content becomes one empty text item. Object or scalar content is kept as
/// its JSON text.
pub fn normalize_content(content: Option<RawContent>) -> Vec<ContentItem> {
    match content {
        Some(RawContent::Parts(items)) => items.into_iter().map(normalize_content_item).collect(),
        Some(RawContent::Text(text)) => vec![ContentItem::text(text)],
        Some(RawContent::Other(value)) => vec![ContentItem::Text {
            text: compact_json(value),
        }],
        None => vec![ContentItem::text("")],
    }
}

/// Normalize one content array element; unknown shapes become their JSON text
pub fn normalize_content_item(item: RawContentItem) -> ContentItem {
    match item {
        RawContentItem::Bare(text) => ContentItem::text(text),
        RawContentItem::Typed(TypedPart::Text { text }) => ContentItem::text(text),
        RawContentItem::Typed(TypedPart::ImageUrl { image_url }) => {
            ContentItem::image(image_url.into_url())
        }
        RawContentItem::Other(value) => {
            let text = compact_json(value);
            debug!(
                "Unrecognized content item (supported: {:?}): {}",
                SUPPORTED_CONTENT_TYPES,
                truncate_for_log(&text)
            );
            ContentItem::Text { text }
        }
    }
}

fn truncate_for_log(text: &str) -> &str {
    if text.len() <= MAX_LOGGED_JSON_SIZE {
        return text;
    }
    let mut end = MAX_LOGGED_JSON_SIZE;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
