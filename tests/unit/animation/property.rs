use super::*;
use crate::foundation::core::Rect;

fn shape() -> AnimatedShape {
    AnimatedShape::new(
        "s",
        Rect::new(0.0, 0.0, 20.0, 10.0),
        Size::new(200.0, 100.0),
        true,
    )
}

#[test]
fn every_documented_attribute_is_in_the_table() {
    for name in [
        "x",
        "y",
        "width",
        "height",
        "opacity",
        "rotate",
        "skewx",
        "skewy",
        "visibility",
        "fillstyle",
        "linestyle",
        "fillcolor",
        "linecolor",
        "charcolor",
        "dimcolor",
        "scale",
        "translate",
    ] {
        assert!(property(name).is_some(), "{name} missing");
    }
    assert!(property("SkewX").is_some());
    assert!(property("blur").is_none());
}

#[test]
fn position_is_read_and_written_in_slide_fractions() {
    let mut s = shape();
    let x = property("x").unwrap();
    assert_eq!(x.read(&s), PropertyValue::Number(0.05));

    x.write(&mut s, &PropertyValue::Number(0.5)).unwrap();
    assert_eq!(s.state().center.x, 100.0);

    let height = property("height").unwrap();
    height.write(&mut s, &PropertyValue::Number(0.2)).unwrap();
    assert!((s.state().scale_y - 2.0).abs() < 1e-12);
}

#[test]
fn visibility_uses_keywords() {
    let mut s = shape();
    let vis = property("visibility").unwrap();
    assert_eq!(vis.value_type, ValueType::Enum);
    vis.write(&mut s, &PropertyValue::Str("hidden".into())).unwrap();
    assert!(!s.state().visible);
    assert_eq!(vis.read(&s), PropertyValue::Str("hidden".into()));
}

#[test]
fn wrong_value_kind_is_rejected() {
    let mut s = shape();
    let err = property("opacity")
        .unwrap()
        .write(&mut s, &PropertyValue::Str("x".into()))
        .unwrap_err();
    assert!(matches!(err, SlideShowError::Contract(_)));
}

#[test]
fn colors_round_trip() {
    let mut s = shape();
    let c = RgbColor::from_rgb8(10, 20, 30);
    let fill = property("fillcolor").unwrap();
    fill.write(&mut s, &PropertyValue::Color(c)).unwrap();
    assert_eq!(fill.read(&s), PropertyValue::Color(c));
}
