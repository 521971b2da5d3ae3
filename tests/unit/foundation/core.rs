use super::*;

#[test]
fn millis_since_saturates() {
    assert_eq!(Millis(700).since(Millis(200)), 500);
    assert_eq!(Millis(200).since(Millis(700)), 0);
    assert_eq!(Millis(u64::MAX).after(10), Millis(u64::MAX));
}

#[test]
fn pixel_size_rejects_zero() {
    assert!(PixelSize::new(0, 10).is_err());
    assert!(PixelSize::new(10, 0).is_err());
    let s = PixelSize::new(4, 3).unwrap();
    assert_eq!(s.rgba_len(), 48);
    assert_eq!(s.to_string(), "4x3");
}

#[test]
fn pixel_size_covers_both_axes() {
    let big = PixelSize::new(1280, 720).unwrap();
    assert!(big.covers(PixelSize::new(1280, 700).unwrap()));
    assert!(!big.covers(PixelSize::new(1300, 700).unwrap()));
}
