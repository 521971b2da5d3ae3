use super::*;
use serde_json::json;

fn deck_json() -> serde_json::Value {
    json!({
        "slideWidth": 28000.0,
        "slideHeight": 15750.0,
        "slides": [
            {
                "hash": "s0",
                "index": 0,
                "masterPage": "m0",
                "background": { "fillColor": "ff0000" },
                "masterPageObjectsVisibility": true
            },
            {
                "hash": "s1",
                "index": 1,
                "name": "Summary",
                "masterPage": "m0",
                "hidden": true,
                "background": { "isCustom": true },
                "interactions": [
                    { "bounds": { "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0 }, "action": "nextpage" },
                    { "bounds": { "x": 20.0, "y": 0.0, "width": 10.0, "height": 10.0 }, "action": { "bookmark": "Summary" } }
                ]
            }
        ]
    })
}

#[test]
fn parses_camel_case_metadata() {
    let info: PresentationInfo = serde_json::from_value(deck_json()).unwrap();
    info.validate().unwrap();
    assert_eq!(info.slide_count(), 2);

    let s0 = info.slide(0).unwrap();
    assert!(s0.master_page_objects_visible());
    assert_eq!(
        s0.background.as_ref().and_then(|b| b.fill_color),
        Some(RgbColor::new(1.0, 0.0, 0.0))
    );

    let s1 = info.slide_by_hash(&SlideHash::new("s1")).unwrap();
    assert!(s1.hidden);
    assert!(!s1.master_page_objects_visible());
    assert_eq!(s1.interactions[0].action, ClickAction::NextPage);
    assert_eq!(
        s1.interactions[1].action,
        ClickAction::Bookmark("Summary".to_owned())
    );
    assert_eq!(info.find_bookmark("Summary"), Some(1));
    assert_eq!(info.find_bookmark("Missing"), None);
}

#[test]
fn background_key_follows_custom_flag() {
    let info: PresentationInfo = serde_json::from_value(deck_json()).unwrap();
    assert_eq!(info.slide(0).unwrap().background_key(), &SlideHash::new("m0"));
    assert_eq!(info.slide(1).unwrap().background_key(), &SlideHash::new("s1"));
}

#[test]
fn validate_rejects_bad_indices_and_sizes() {
    let mut info: PresentationInfo = serde_json::from_value(deck_json()).unwrap();
    info.slides[1].index = 5;
    assert!(info.validate().is_err());

    let mut info: PresentationInfo = serde_json::from_value(deck_json()).unwrap();
    info.slide_height = 0.0;
    assert!(info.validate().is_err());

    let mut info: PresentationInfo = serde_json::from_value(deck_json()).unwrap();
    info.slides[1].hash = SlideHash::new("s0");
    assert!(info.validate().is_err());
}

#[test]
fn bounds_contains_is_inclusive() {
    let b = Bounds {
        x: 10.0,
        y: 10.0,
        width: 5.0,
        height: 5.0,
    };
    assert!(b.contains(Point::new(10.0, 15.0)));
    assert!(!b.contains(Point::new(9.9, 12.0)));
    assert_eq!(b.to_rect(), Rect::new(10.0, 10.0, 15.0, 15.0));
}
