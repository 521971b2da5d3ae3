use super::*;
use crate::model::layer::{ImageInfo, ImageKind};

fn bitmap(checksum: &str) -> LayerEntry {
    LayerEntry::Bitmap(ImageInfo {
        kind: ImageKind::Png,
        checksum: checksum.to_owned(),
    })
}

#[test]
fn in_order_appends_are_accepted() {
    let mut cache = LayerCache::default();
    let page = SlideHash::new("s0");
    for i in 0..3 {
        let outcome = cache.append_layer(LayerGroup::DrawPage, page.clone(), Some(i), bitmap("a"));
        assert_eq!(outcome, AppendOutcome::InOrder);
    }
    assert_eq!(cache.layers(LayerGroup::DrawPage, &page).unwrap().len(), 3);
}

#[test]
fn out_of_order_index_is_reported_but_appended() {
    let mut cache = LayerCache::default();
    let page = SlideHash::new("m0");
    cache.append_layer(LayerGroup::MasterPage, page.clone(), Some(0), bitmap("a"));
    let outcome = cache.append_layer(LayerGroup::MasterPage, page.clone(), Some(3), bitmap("b"));
    assert_eq!(outcome, AppendOutcome::OutOfOrder { expected: 1, got: 3 });
    assert_eq!(cache.layers(LayerGroup::MasterPage, &page).unwrap().len(), 2);
}

#[test]
fn index_zero_restarts_the_list() {
    let mut cache = LayerCache::default();
    let page = SlideHash::new("s0");
    cache.append_layer(LayerGroup::DrawPage, page.clone(), Some(0), bitmap("a"));
    cache.append_layer(LayerGroup::DrawPage, page.clone(), Some(1), bitmap("b"));
    cache.append_layer(LayerGroup::DrawPage, page.clone(), Some(0), bitmap("c"));
    let list = cache.layers(LayerGroup::DrawPage, &page).unwrap();
    assert_eq!(list.entries(), &[bitmap("c")]);
}

#[test]
fn text_fields_and_backgrounds_are_keyed() {
    let mut cache = LayerCache::default();
    let s0 = SlideHash::new("s0");
    cache.set_text_field(s0.clone(), TextFieldType::Footer, "f".to_owned());
    cache.set_background(SlideHash::new("m0"), "bg".to_owned());
    assert_eq!(cache.text_field(&s0, TextFieldType::Footer), Some("f"));
    assert_eq!(cache.text_field(&s0, TextFieldType::DateTime), None);
    assert_eq!(cache.background_checksum(&SlideHash::new("m0")), Some("bg"));

    cache.touch_layers(LayerGroup::MasterPage, SlideHash::new("m1"));
    assert_eq!(
        cache
            .layers(LayerGroup::MasterPage, &SlideHash::new("m1"))
            .map(LayerList::len),
        Some(0)
    );

    cache.clear();
    assert!(cache.background_checksum(&SlideHash::new("m0")).is_none());
}
