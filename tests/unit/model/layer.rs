use super::*;
use serde_json::json;

#[test]
fn decodes_bitmap_payload() {
    let msg: LayerMessage = serde_json::from_value(json!({
        "slideHash": "s0",
        "group": "DrawPage",
        "index": 0,
        "type": "bitmap",
        "content": { "type": "png", "checksum": "abc" }
    }))
    .unwrap();
    assert_eq!(msg.group, LayerGroup::DrawPage);
    assert_eq!(
        msg.decode_content().unwrap(),
        LayerContent::Bitmap(ImageInfo {
            kind: ImageKind::Png,
            checksum: "abc".to_owned()
        })
    );
}

#[test]
fn decodes_animated_and_text_field_payloads() {
    let msg: LayerMessage = serde_json::from_value(json!({
        "slideHash": "s0",
        "group": "DrawPage",
        "index": 1,
        "type": "animated",
        "content": {
            "hash": "shape-1",
            "initVisible": false,
            "type": "svg",
            "bounds": { "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 }
        }
    }))
    .unwrap();
    let LayerContent::Animated(shape) = msg.decode_content().unwrap() else {
        panic!("expected animated content");
    };
    assert_eq!(shape.hash, "shape-1");
    assert_eq!(shape.kind, ShapeContentKind::Svg);
    assert!(!shape.init_visible);

    let msg: LayerMessage = serde_json::from_value(json!({
        "slideHash": "s0",
        "group": "TextFields",
        "type": "textfield",
        "content": { "type": "SlideNumber", "content": { "type": "png", "checksum": "n1" } }
    }))
    .unwrap();
    let LayerContent::TextField(field) = msg.decode_content().unwrap() else {
        panic!("expected text field content");
    };
    assert_eq!(field.field, TextFieldType::SlideNumber);
    assert_eq!(field.content.checksum, "n1");
}

#[test]
fn malformed_payload_is_a_protocol_error() {
    let msg: LayerMessage = serde_json::from_value(json!({
        "slideHash": "s0",
        "group": "MasterPage",
        "index": 0,
        "type": "placeholder",
        "content": { "type": "PageCount" }
    }))
    .unwrap();
    let err = msg.decode_content().unwrap_err();
    assert!(matches!(err, SlideShowError::Protocol(_)));
}

#[test]
fn empty_marker_needs_no_content() {
    let msg: LayerMessage = serde_json::from_value(json!({
        "slideHash": "s0",
        "group": "MasterPage",
        "type": "empty"
    }))
    .unwrap();
    assert_eq!(msg.decode_content().unwrap(), LayerContent::Empty);
}
