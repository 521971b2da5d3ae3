use super::*;

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 0, 0, 255], 1.0), [200, 0, 0, 255]);
}

#[test]
fn transparent_source_or_zero_opacity_is_identity() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
}

#[test]
fn half_alpha_blends() {
    let out = over([0, 0, 255, 255], [128, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[2], 127);
}

#[test]
fn blit_clips_to_destination() {
    let mut dst = vec![0u8; 2 * 2 * 4];
    let src = [255u8, 0, 0, 255].repeat(3);
    blit_over(&mut dst, 2, 2, &src, 3, 1, 1.0);
    assert_eq!(&dst[0..8], &[255, 0, 0, 255, 255, 0, 0, 255]);
    assert_eq!(&dst[8..16], &[0u8; 8]);
}
