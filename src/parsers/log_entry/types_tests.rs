use super::*;
use serde_json::json;

fn request(value: Value) -> RawRequest {
    match value {
        Value::Object(request) => RawRequest::from_map(request),
        other => panic!("Expected object, got {}", other),
    }
}

fn message(value: Value) -> RawMessage {
    match RawMessageEntry::from(value) {
        RawMessageEntry::Object(message) => message,
        other => panic!("Expected message object, got {:?}", other),
    }
}

#[test]
fn test_request_splits_messages_from_props() {
    let request = request(json!({
        "model": "gpt-4o",
        "messages": [{"role": "user", "content": "hi"}],
        "stream": false
    }));

    let keys: Vec<&String> = request.props.keys().collect();
    assert_eq!(keys, vec!["model", "stream"]);
    assert_eq!(request.messages.unwrap().into_entries().len(), 1);
}

#[test]
fn test_request_props_keep_source_order() {
    let request = request(
        serde_json::from_str(r#"{"top_p":1,"model":"x","messages":[],"max_tokens":10}"#).unwrap(),
    );

    let keys: Vec<&String> = request.props.keys().collect();
    assert_eq!(keys, vec!["top_p", "model", "max_tokens"]);
}

#[test]
fn test_request_without_messages() {
    let request = request(json!({"model": "x"}));
    assert!(request.messages.is_none());
    assert_eq!(request.props.len(), 1);
}

#[test]
fn test_non_array_messages_yield_no_entries() {
    let request = request(json!({"model": "x", "messages": "oops"}));

    assert!(!request.props.contains_key("messages"));
    assert!(request.messages.unwrap().into_entries().is_empty());
}

#[test]
fn test_message_entry_variants() {
    let entries = RawMessages::from(json!([{"role": "user"}, "loose string", null])).into_entries();

    assert!(matches!(entries[0], RawMessageEntry::Object(_)));
    assert!(matches!(entries[1], RawMessageEntry::Other(Value::String(_))));
    assert!(matches!(entries[2], RawMessageEntry::Other(Value::Null)));
}

#[test]
fn test_message_extra_fields() {
    let message = message(json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{"id": "call_1"}],
        "name": "helper"
    }));

    assert_eq!(message.role_label(), "assistant");
    assert!(message.content.is_none());
    let keys: Vec<&String> = message.extra.keys().collect();
    assert_eq!(keys, vec!["tool_calls", "name"]);
}

#[test]
fn test_role_label_variants() {
    assert_eq!(message(json!({})).role_label(), "");
    assert_eq!(message(json!({"role": null})).role_label(), "");
    assert_eq!(message(json!({"role": 3})).role_label(), "3");
    assert_eq!(message(json!({"role": ["a", 2.0]})).role_label(), r#"["a",2]"#);
}

#[test]
fn test_content_variants() {
    let content = RawContent::from_value(json!("plain"));
    assert!(matches!(content, Some(RawContent::Text(ref s)) if s == "plain"));

    let content = RawContent::from_value(json!([]));
    assert!(matches!(content, Some(RawContent::Parts(ref parts)) if parts.is_empty()));

    let content = RawContent::from_value(json!({"text": "x"}));
    assert!(matches!(content, Some(RawContent::Other(_))));
}

#[test]
fn test_content_from_value() {
    assert!(RawContent::from_value(Value::Null).is_none());
    assert!(matches!(
        RawContent::from_value(json!("hi")),
        Some(RawContent::Text(_))
    ));
    assert!(matches!(
        RawContent::from_value(json!(42)),
        Some(RawContent::Other(_))
    ));
}

#[test]
fn test_content_item_variants() {
    let items = match RawContent::from_value(json!([
        "bare",
        {"type": "text", "text": "typed", "cache_control": {"type": "ephemeral"}},
        {"type": "image_url", "image_url": {"url": "https://example.com/a.png", "detail": "low"}},
        {"type": "image_url", "image_url": "https://example.com/b.png"},
        {"type": "input_audio", "input_audio": {"data": "AAAA"}},
        {"type": "text"},
        7,
        {"type": "image_url", "image_url": {"detail": "low"}}
    ])) {
        Some(RawContent::Parts(items)) => items,
        other => panic!("Expected content parts, got {:?}", other),
    };

    assert!(matches!(items[0], RawContentItem::Bare(_)));
    assert!(matches!(items[1], RawContentItem::Typed(TypedPart::Text { ref text }) if text == "typed"));
    match &items[2] {
        RawContentItem::Typed(TypedPart::ImageUrl { image_url }) => {
            assert_eq!(image_url.clone().into_url(), "https://example.com/a.png");
        }
        other => panic!("Expected image part, got {:?}", other),
    }
    match &items[3] {
        RawContentItem::Typed(TypedPart::ImageUrl { image_url }) => {
            assert_eq!(image_url.clone().into_url(), "https://example.com/b.png");
        }
        other => panic!("Expected image part, got {:?}", other),
    }
    assert!(matches!(items[4], RawContentItem::Other(_)));
    // A text part without its payload is not a text part
    assert!(matches!(items[5], RawContentItem::Other(_)));
    assert!(matches!(items[6], RawContentItem::Other(_)));
    assert!(matches!(items[7], RawContentItem::Other(_)));
}

#[test]
fn test_compact_json_keeps_order_and_fractions() {
    let value: Value = serde_json::from_str(r#"{"z":1.0,"a":{"b":[0.5,-2.0,1e3]},"s":"1.0"}"#).unwrap();
    assert_eq!(compact_json(value), r#"{"z":1,"a":{"b":[0.5,-2,1000]},"s":"1.0"}"#);
}

#[test]
fn test_compact_json_large_floats_unchanged() {
    let value: Value = serde_json::from_str("[1e300]").unwrap();
    assert_eq!(compact_json(value), "[1e300]");
}
