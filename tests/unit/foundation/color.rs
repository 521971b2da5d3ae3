use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(RgbColor::from_hex("ff0000").unwrap(), RgbColor::new(1.0, 0.0, 0.0));
    assert_eq!(RgbColor::from_hex("#0000FF").unwrap(), RgbColor::new(0.0, 0.0, 1.0));
    assert!(RgbColor::from_hex("#12345").is_err());
    assert!(RgbColor::from_hex("zz0000").is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c: RgbColor = serde_json::from_value(serde_json::json!("00ff00")).unwrap();
    assert_eq!(c, RgbColor::new(0.0, 1.0, 0.0));
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#00ff00"));
}

#[test]
fn rgb_channels_are_clamped() {
    let c = RgbColor::new(1.5, -0.2, 0.5);
    assert_eq!(c, RgbColor::new(1.0, 0.0, 0.5));
}

#[test]
fn primary_colors_convert_to_hsl() {
    let red = RgbColor::new(1.0, 0.0, 0.0).to_hsl();
    assert!(close(red.hue, 0.0) && close(red.saturation, 1.0) && close(red.lightness, 0.5));

    let green = RgbColor::new(0.0, 1.0, 0.0).to_hsl();
    assert!(close(green.hue, 120.0));

    let blue = RgbColor::new(0.0, 0.0, 1.0).to_hsl();
    assert!(close(blue.hue, 240.0));

    let grey = RgbColor::new(0.5, 0.5, 0.5).to_hsl();
    assert!(close(grey.saturation, 0.0) && close(grey.lightness, 0.5));
}

#[test]
fn hsl_rgb_round_trip() {
    for c in [
        RgbColor::new(0.2, 0.4, 0.6),
        RgbColor::new(0.9, 0.1, 0.3),
        RgbColor::new(0.05, 0.75, 0.5),
    ] {
        let back = c.to_hsl().to_rgb();
        assert!(close(back.red, c.red), "{c:?} -> {back:?}");
        assert!(close(back.green, c.green), "{c:?} -> {back:?}");
        assert!(close(back.blue, c.blue), "{c:?} -> {back:?}");
    }
}

#[test]
fn hue_interpolation_crosses_zero() {
    let from = HslColor::new(350.0, 1.0, 0.5);
    let to = HslColor::new(10.0, 1.0, 0.5);

    let mid = from.interpolate(to, 0.5, ClockDirection::CounterClockwise);
    assert!(close(mid.hue, 0.0), "got {}", mid.hue);

    let back = to.interpolate(from, 0.5, ClockDirection::Clockwise);
    assert!(close(back.hue, 0.0), "got {}", back.hue);

    // The opposite directions take the long way round.
    let long = from.interpolate(to, 0.5, ClockDirection::Clockwise);
    assert!(close(long.hue, 180.0), "got {}", long.hue);
}

#[test]
fn shortest_direction_picks_small_arc() {
    assert_eq!(
        ClockDirection::shortest(350.0, 10.0),
        ClockDirection::CounterClockwise
    );
    assert_eq!(ClockDirection::shortest(10.0, 350.0), ClockDirection::Clockwise);
}

#[test]
fn rgb_interpolation_is_componentwise() {
    let c = RgbColor::BLACK.interpolate(RgbColor::new(1.0, 0.5, 0.0), 0.5);
    assert_eq!(c, RgbColor::new(0.5, 0.25, 0.0));
}
