use super::*;

#[test]
fn defaults_match_documented_constants() {
    let opts = SlideShowOpts::default();
    assert_eq!(opts.compositor.debounce_ms, 500);
    assert!(opts.compositor.prefetch);
    assert_eq!(opts.compositor.resolutions.len(), 4);
    assert!(opts.engine.transitions);
    assert!(opts.navigator.auto_advance);
    opts.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let opts = SlideShowOpts::from_json_str(r#"{ "compositor": { "debounceMs": 50 } }"#).unwrap();
    assert_eq!(opts.compositor.debounce_ms, 50);
    assert!(opts.compositor.prefetch);
    assert_eq!(opts.compositor.resolutions[0].width, 960);
}

#[test]
fn empty_resolution_ladder_is_rejected() {
    let err =
        SlideShowOpts::from_json_str(r#"{ "compositor": { "resolutions": [] } }"#).unwrap_err();
    assert!(err.to_string().contains("resolutions"));
}
