use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideShowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlideShowError::protocol("x")
            .to_string()
            .contains("protocol error:")
    );
    assert!(
        SlideShowError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        SlideShowError::contract("x")
            .to_string()
            .contains("contract violation:")
    );
    assert!(
        SlideShowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideShowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: SlideShowError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SlideShowError::Serde(_)));
}
