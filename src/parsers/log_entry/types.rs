//! Captured request body types
//!
//! Shapes of the completion request JSON as the relay logs it, classified
//! from an already parsed `Value` without recursing into nested data. Every
//! field is lenient: anything the normalizer does not recognize lands in a
//! fallback variant or an extras map instead of failing the entry.
//!
//! ## Request Body Format
//!
//! ```json
//! {
//!   "model": "gpt-4o",
//!   "messages": [
//!     {"role": "system", "content": "You are terse."},
//!     {"role": "user", "content": [
//!       {"type": "text", "text": "What is this?"},
//!       {"type": "image_url", "image_url": {"url": "https://..."}}
//!     ]}
//!   ],
//!   "temperature": 0.7
//! }
//! ```

use serde_json::{Map, Number, Value};

/// Request body object
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// Conversation; removed from the props even when it is not an array
    pub messages: Option<RawMessages>,

    /// Every other top-level field, in source order
    pub props: Map<String, Value>,
}

impl RawRequest {
    pub fn from_map(request: Map<String, Value>) -> Self {
        let mut messages = None;
        let mut props = Map::new();
        for (key, value) in request {
            if key == "messages" {
                messages = Some(RawMessages::from(value));
            } else {
                props.insert(key, value);
            }
        }
        Self { messages, props }
    }
}

/// The `messages` field
#[derive(Debug, Clone)]
pub enum RawMessages {
    List(Vec<RawMessageEntry>),
    /// Not an array; yields no messages
    Other(Value),
}

impl RawMessages {
    pub fn into_entries(self) -> Vec<RawMessageEntry> {
        match self {
            RawMessages::List(entries) => entries,
            RawMessages::Other(_) => Vec::new(),
        }
    }
}

impl From<Value> for RawMessages {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(entries) => {
                RawMessages::List(entries.into_iter().map(RawMessageEntry::from).collect())
            }
            other => RawMessages::Other(other),
        }
    }
}

/// One element of the `messages` array
#[derive(Debug, Clone)]
pub enum RawMessageEntry {
    Object(RawMessage),
    /// A non-object entry (string, number, null, array)
    Other(Value),
}

impl From<Value> for RawMessageEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(message) => RawMessageEntry::Object(RawMessage::from_map(message)),
            other => RawMessageEntry::Other(other),
        }
    }
}

/// Message object
#[derive(Debug, Clone, Default)]
pub struct RawMessage {
    /// Usually a string; kept as a value so odd producers don't break parsing
    pub role: Option<Value>,

    pub content: Option<RawContent>,

    /// Any field besides `role` and `content` (name, tool_calls, ...)
    pub extra: Map<String, Value>,
}

impl RawMessage {
    pub fn from_map(message: Map<String, Value>) -> Self {
        let mut raw = RawMessage::default();
        for (key, value) in message {
            match key.as_str() {
                "role" => raw.role = Some(value),
                "content" => raw.content = RawContent::from_value(value),
                _ => {
                    raw.extra.insert(key, value);
                }
            }
        }
        raw
    }

    /// Role as display text; strings verbatim, other values as JSON
    pub fn role_label(&self) -> String {
        match &self.role {
            Some(Value::String(role)) => role.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => compact_json(other.clone()),
        }
    }
}

/// Message content: a string or an array of parts
#[derive(Debug, Clone)]
pub enum RawContent {
    Text(String),
    Parts(Vec<RawContentItem>),
    /// Object or scalar content
    Other(Value),
}

impl RawContent {
    /// Classify an arbitrary value; `null` means no content
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(RawContent::Text(text)),
            Value::Array(items) => Some(RawContent::Parts(
                items.into_iter().map(RawContentItem::from).collect(),
            )),
            other => Some(RawContent::Other(other)),
        }
    }
}

/// One element of a content array
#[derive(Debug, Clone)]
pub enum RawContentItem {
    /// Bare string part
    Bare(String),
    /// A part with a recognized `type` tag
    Typed(TypedPart),
    /// Anything else, kept for lossless display
    Other(Value),
}

impl From<Value> for RawContentItem {
    fn from(value: Value) -> Self {
        if let Value::String(text) = value {
            return RawContentItem::Bare(text);
        }
        let typed = value.as_object().and_then(TypedPart::from_object);
        match typed {
            Some(part) => RawContentItem::Typed(part),
            None => RawContentItem::Other(value),
        }
    }
}

/// Content part tagged by `type`
///
/// Fields besides the tag and the payload (`cache_control`, `detail`) are
/// ignored.
#[derive(Debug, Clone)]
pub enum TypedPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl TypedPart {
    /// Recognize a part by its `type` tag and payload shape
    pub fn from_object(part: &Map<String, Value>) -> Option<Self> {
        match part.get("type").and_then(Value::as_str)? {
            "text" => part.get("text").and_then(Value::as_str).map(|text| TypedPart::Text {
                text: text.to_string(),
            }),
            "image_url" => part
                .get("image_url")
                .and_then(ImageUrl::from_value)
                .map(|image_url| TypedPart::ImageUrl { image_url }),
            _ => None,
        }
    }
}

/// `image_url` payload: `{"url": ...}` or, from some clients, a bare string
#[derive(Debug, Clone)]
pub enum ImageUrl {
    Object { url: String },
    Bare(String),
}

impl ImageUrl {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) => Some(ImageUrl::Bare(url.clone())),
            Value::Object(payload) => payload
                .get("url")
                .and_then(Value::as_str)
                .map(|url| ImageUrl::Object { url: url.to_string() }),
            _ => None,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            ImageUrl::Object { url } | ImageUrl::Bare(url) => url,
        }
    }
}

/// Compact JSON text of a value, integral floats written as integers
///
/// `{"v":1.0}` becomes `{"v":1}`, the way browsers print it.
pub fn compact_json(mut value: Value) -> String {
    {
        let mut pending = vec![&mut value];
        while let Some(current) = pending.pop() {
            match current {
                Value::Number(number) => {
                    if let Some(integer) = integral_float(number) {
                        *number = Number::from(integer);
                    }
                }
                Value::Array(items) => pending.extend(items.iter_mut()),
                Value::Object(fields) => pending.extend(fields.values_mut()),
                _ => {}
            }
        }
    }
    value.to_string()
}

fn integral_float(number: &Number) -> Option<i64> {
    let float = number.as_f64().filter(|_| number.is_f64())?;
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&float);
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
