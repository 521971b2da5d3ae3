use super::*;
use crate::compositor::fetch::InMemoryFetchSink;
use crate::foundation::color::RgbColor;
use crate::model::layer::LayerKind;
use crate::model::presentation::BackgroundInfo;
use serde_json::json;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn size(width: u32, height: u32) -> PixelSize {
    PixelSize { width, height }
}

fn deck(n: usize) -> PresentationInfo {
    PresentationInfo {
        slide_width: 16.0,
        slide_height: 9.0,
        slides: (0..n)
            .map(|i| SlideInfo::new(format!("s{i}"), i, "m0"))
            .collect(),
    }
}

fn opts(prefetch: bool) -> CompositorOpts {
    CompositorOpts {
        prefetch,
        resolutions: vec![size(16, 9)],
        ..CompositorOpts::default()
    }
}

fn compositor(info: PresentationInfo, prefetch: bool) -> SlideCompositor<InMemoryFetchSink> {
    SlideCompositor::new(
        Arc::new(info),
        size(16, 9),
        opts(prefetch),
        InMemoryFetchSink::new(),
    )
    .unwrap()
}

fn message(
    slide: &str,
    group: LayerGroup,
    index: Option<usize>,
    kind: LayerKind,
    content: serde_json::Value,
) -> LayerMessage {
    LayerMessage {
        slide_hash: SlideHash::new(slide),
        group,
        index,
        kind,
        content,
    }
}

fn png(slide: &str, group: LayerGroup, index: usize, checksum: &str) -> LayerMessage {
    message(
        slide,
        group,
        Some(index),
        LayerKind::Bitmap,
        json!({ "type": "png", "checksum": checksum }),
    )
}

fn empty(slide: &str, group: LayerGroup) -> LayerMessage {
    message(slide, group, None, LayerKind::Empty, serde_json::Value::Null)
}

fn finish_empty_slide(c: &mut SlideCompositor<InMemoryFetchSink>, slide: &str) {
    c.on_layer(&empty(slide, LayerGroup::DrawPage), None).unwrap();
    c.on_rendering_complete(&SlideHash::new(slide)).unwrap();
}

#[test]
fn cached_slide_is_served_without_a_second_fetch() {
    let mut c = compositor(deck(2), false);

    c.request_slide(0, ReadyTicket(1)).unwrap();
    assert_eq!(c.sink().sent().len(), 1);
    assert!(c.take_ready().is_empty());

    finish_empty_slide(&mut c, "s0");
    let ready = c.take_ready();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].ticket, ReadyTicket(1));
    assert_eq!(ready[0].identity.hash, SlideHash::new("s0"));
    assert!(c.take_ready().is_empty());

    c.request_slide(0, ReadyTicket(2)).unwrap();
    assert_eq!(c.sink().sent().len(), 1);
    let ready = c.take_ready();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].ticket, ReadyTicket(2));
    assert!(c.is_idle());
}

#[test]
fn duplicate_request_joins_the_active_one() {
    let mut c = compositor(deck(2), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.request_slide(0, ReadyTicket(2)).unwrap();
    assert_eq!(c.sink().sent().len(), 1);

    finish_empty_slide(&mut c, "s0");
    let tickets: Vec<_> = c.take_ready().into_iter().map(|r| r.ticket).collect();
    assert_eq!(tickets, vec![ReadyTicket(1), ReadyTicket(2)]);
}

#[test]
fn stages_are_drawn_background_then_master_then_draw_page() {
    let mut info = deck(1);
    info.slides[0].background = Some(BackgroundInfo::default());
    info.slides[0].master_page_objects_visibility = Some(true);
    let mut c = compositor(info, false);

    c.request_slide(0, ReadyTicket(1)).unwrap();
    let req = &c.sink().sent()[0];
    assert!(req.render_background);
    assert!(req.render_master_page);
    assert_eq!((req.width, req.height), (16, 9));

    c.on_layer(
        &png("s0", LayerGroup::Background, 0, "bg"),
        Some(Bitmap::solid(16, 9, RED)),
    )
    .unwrap();
    c.on_layer(
        &png("s0", LayerGroup::MasterPage, 0, "mp"),
        Some(Bitmap::solid(8, 9, GREEN)),
    )
    .unwrap();
    c.on_layer(
        &png("s0", LayerGroup::DrawPage, 0, "dp"),
        Some(Bitmap::solid(4, 9, BLUE)),
    )
    .unwrap();
    c.on_rendering_complete(&SlideHash::new("s0")).unwrap();

    let image = c.slide_image(0).unwrap();
    assert_eq!(image.bitmap.pixel(1, 1), Some(BLUE));
    assert_eq!(image.bitmap.pixel(6, 1), Some(GREEN));
    assert_eq!(image.bitmap.pixel(12, 1), Some(RED));
    assert_eq!(c.take_ready().len(), 1);
}

#[test]
fn fill_color_background_needs_no_bitmap() {
    let mut info = deck(1);
    info.slides[0].background = Some(BackgroundInfo {
        fill_color: Some(RgbColor::from_rgb8(255, 0, 0)),
        is_custom: true,
    });
    let mut c = compositor(info, false);

    c.request_slide(0, ReadyTicket(1)).unwrap();
    assert!(!c.sink().sent()[0].render_background);
    assert!(!c.sink().sent()[0].render_master_page);

    finish_empty_slide(&mut c, "s0");
    assert_eq!(c.slide_image(0).unwrap().bitmap.pixel(3, 3), Some(RED));
}

#[test]
fn empty_slide_without_stages_composes_immediately() {
    let mut info = deck(1);
    info.slides[0].empty = true;
    let mut c = compositor(info, false);

    c.request_slide(0, ReadyTicket(9)).unwrap();
    assert!(c.sink().sent().is_empty());
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(9));
    assert_eq!(c.slide_image(0).unwrap().bitmap.pixel(0, 0), Some(CLEAR));
}

#[test]
fn prefetch_follows_ready_slide_and_reuses_shared_layers() {
    let mut info = deck(3);
    for slide in &mut info.slides {
        slide.background = Some(BackgroundInfo::default());
        slide.master_page_objects_visibility = Some(true);
    }
    let mut c = compositor(info, true);

    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.on_layer(
        &png("s0", LayerGroup::Background, 0, "bg"),
        Some(Bitmap::solid(16, 9, RED)),
    )
    .unwrap();
    c.on_layer(
        &png("s0", LayerGroup::MasterPage, 0, "mp"),
        Some(Bitmap::solid(2, 2, GREEN)),
    )
    .unwrap();
    finish_empty_slide(&mut c, "s0");
    assert_eq!(c.take_ready().len(), 1);

    let sent = c.sink().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].part, 1);
    assert!(!sent[1].render_background);
    assert!(!sent[1].render_master_page);

    // A prefetch carries no ticket and does not chain another prefetch.
    finish_empty_slide(&mut c, "s1");
    assert!(c.take_ready().is_empty());
    assert_eq!(c.sink().sent().len(), 2);
    assert_eq!(c.cached_slide_count(), 2);

    c.request_slide(1, ReadyTicket(2)).unwrap();
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(2));
    assert_eq!(c.sink().sent().last().unwrap().part, 2);
}

#[test]
fn rapid_requests_coalesce_to_the_last_target() {
    let mut c = compositor(deck(4), false);
    c.request_slide(0, ReadyTicket(0)).unwrap();
    for i in 1..=3 {
        c.request_slide(i, ReadyTicket(i as u64)).unwrap();
    }
    assert_eq!(c.sink().sent().len(), 1);

    c.tick(Millis(499)).unwrap();
    assert_eq!(c.sink().sent().len(), 1);

    c.tick(Millis(500)).unwrap();
    let sent = c.sink().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].part, 3);

    c.tick(Millis(2_000)).unwrap();
    assert_eq!(c.sink().sent().len(), 2);

    finish_empty_slide(&mut c, "s3");
    let tickets: Vec<_> = c.take_ready().into_iter().map(|r| r.ticket).collect();
    assert_eq!(tickets, vec![ReadyTicket(3)]);
}

#[test]
fn queued_request_waits_for_active_completion_when_it_arrives_first() {
    let mut c = compositor(deck(3), false);
    c.request_slide(0, ReadyTicket(0)).unwrap();
    c.request_slide(2, ReadyTicket(2)).unwrap();

    finish_empty_slide(&mut c, "s0");
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(0));
    assert_eq!(c.sink().sent().len(), 1);

    c.tick(Millis(500)).unwrap();
    assert_eq!(c.sink().sent()[1].part, 2);
}

#[test]
fn cached_slide_request_drops_the_queued_target() {
    let mut c = compositor(deck(3), false);
    c.request_slide(2, ReadyTicket(0)).unwrap();
    finish_empty_slide(&mut c, "s2");
    c.take_ready();

    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.request_slide(1, ReadyTicket(2)).unwrap();
    c.request_slide(2, ReadyTicket(3)).unwrap();
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(3));

    c.tick(Millis(500)).unwrap();
    let parts: Vec<_> = c.sink().sent().iter().map(|r| r.part).collect();
    assert_eq!(parts, vec![2, 0]);

    finish_empty_slide(&mut c, "s0");
    let tickets: Vec<_> = c.take_ready().into_iter().map(|r| r.ticket).collect();
    assert_eq!(tickets, vec![ReadyTicket(1)]);
    c.tick(Millis(2_000)).unwrap();
    assert_eq!(c.sink().sent().len(), 2);
    assert!(c.is_idle());
}

#[test]
fn slide_completed_without_its_background_is_recomposed_later() {
    let mut info = deck(1);
    info.slides[0].background = Some(BackgroundInfo::default());
    let mut c = compositor(info, false);

    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.on_layer(
        &png("s0", LayerGroup::DrawPage, 0, "dp"),
        Some(Bitmap::solid(4, 9, BLUE)),
    )
    .unwrap();
    c.on_rendering_complete(&SlideHash::new("s0")).unwrap();
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(1));
    let image = c.slide_image(0).unwrap();
    assert!(!image.complete);
    assert_eq!(image.bitmap.pixel(1, 1), Some(BLUE));
    assert_eq!(image.bitmap.pixel(12, 1), Some(CLEAR));

    c.request_slide(0, ReadyTicket(2)).unwrap();
    let sent = c.sink().sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].render_background);
    assert!(c.take_ready().is_empty());

    c.on_layer(
        &png("s0", LayerGroup::Background, 0, "bg"),
        Some(Bitmap::solid(16, 9, RED)),
    )
    .unwrap();
    c.on_rendering_complete(&SlideHash::new("s0")).unwrap();
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(2));
    let image = c.slide_image(0).unwrap();
    assert!(image.complete);
    assert_eq!(image.bitmap.pixel(1, 1), Some(BLUE));
    assert_eq!(image.bitmap.pixel(12, 1), Some(RED));

    c.request_slide(0, ReadyTicket(3)).unwrap();
    assert_eq!(c.sink().sent().len(), 2);
    assert_eq!(c.take_ready()[0].ticket, ReadyTicket(3));
}

#[test]
fn completion_for_another_slide_is_ignored() {
    let mut c = compositor(deck(2), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.on_rendering_complete(&SlideHash::new("s1")).unwrap();
    assert!(c.take_ready().is_empty());
    assert!(!c.is_idle());
}

#[test]
fn out_of_order_layers_are_still_drawn() {
    let mut c = compositor(deck(1), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    c.on_layer(
        &png("s0", LayerGroup::DrawPage, 0, "a"),
        Some(Bitmap::solid(16, 9, RED)),
    )
    .unwrap();
    c.on_layer(
        &png("s0", LayerGroup::DrawPage, 2, "b"),
        Some(Bitmap::solid(4, 4, BLUE)),
    )
    .unwrap();
    c.on_rendering_complete(&SlideHash::new("s0")).unwrap();

    let image = c.slide_image(0).unwrap();
    assert_eq!(image.bitmap.pixel(1, 1), Some(BLUE));
    assert_eq!(image.bitmap.pixel(10, 5), Some(RED));
}

#[test]
fn placeholder_is_substituted_with_slide_text_field() {
    let mut info = deck(2);
    for slide in &mut info.slides {
        slide.master_page_objects_visibility = Some(true);
    }
    let mut c = compositor(info, false);
    c.request_slide(0, ReadyTicket(1)).unwrap();

    c.on_layer(
        &message(
            "s0",
            LayerGroup::MasterPage,
            Some(0),
            LayerKind::Placeholder,
            json!({ "type": "SlideNumber" }),
        ),
        None,
    )
    .unwrap();
    c.on_layer(
        &message(
            "s0",
            LayerGroup::TextFields,
            None,
            LayerKind::TextField,
            json!({ "type": "SlideNumber", "content": { "type": "png", "checksum": "n0" } }),
        ),
        Some(Bitmap::solid(2, 2, BLUE)),
    )
    .unwrap();
    finish_empty_slide(&mut c, "s0");
    assert_eq!(c.slide_image(0).unwrap().bitmap.pixel(1, 1), Some(BLUE));

    // Slide 1 shares the master page but has no text field of its own.
    c.request_slide(1, ReadyTicket(2)).unwrap();
    assert!(!c.sink().sent()[1].render_master_page);
    finish_empty_slide(&mut c, "s1");
    assert_eq!(c.slide_image(1).unwrap().bitmap.pixel(1, 1), Some(CLEAR));
}

#[test]
fn hidden_master_page_layers_are_ignored() {
    let mut c = compositor(deck(1), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    assert!(!c.sink().sent()[0].render_master_page);

    c.on_layer(
        &png("s0", LayerGroup::MasterPage, 0, "mp"),
        Some(Bitmap::solid(16, 9, GREEN)),
    )
    .unwrap();
    finish_empty_slide(&mut c, "s0");
    assert_eq!(c.slide_image(0).unwrap().bitmap.pixel(0, 0), Some(CLEAR));
}

#[test]
fn animated_shapes_draw_only_when_initially_visible() {
    let mut c = compositor(deck(1), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    let shape = |hash: &str, visible: bool| {
        message(
            "s0",
            LayerGroup::DrawPage,
            None,
            LayerKind::Animated,
            json!({
                "hash": hash,
                "initVisible": visible,
                "type": "bitmap",
                "bounds": { "x": 0.0, "y": 0.0, "width": 4.0, "height": 4.0 },
            }),
        )
    };
    c.on_layer(&shape("hidden", false), Some(Bitmap::solid(16, 9, RED)))
        .unwrap();
    c.on_layer(&shape("shown", true), Some(Bitmap::solid(2, 2, BLUE)))
        .unwrap();
    c.on_rendering_complete(&SlideHash::new("s0")).unwrap();

    let image = c.slide_image(0).unwrap();
    assert_eq!(image.bitmap.pixel(1, 1), Some(BLUE));
    assert_eq!(image.bitmap.pixel(8, 8), Some(CLEAR));

    let shapes = c.animated_shapes(0);
    assert_eq!(shapes.len(), 2);
    assert!(c.shape_image(&shapes[0]).is_some());
}

#[test]
fn layer_kind_not_valid_for_group_is_a_protocol_error() {
    let mut c = compositor(deck(1), false);
    let msg = message(
        "s0",
        LayerGroup::Background,
        Some(0),
        LayerKind::Placeholder,
        json!({ "type": "Footer" }),
    );
    let err = c.on_layer(&msg, None).unwrap_err();
    assert!(matches!(err, SlideShowError::Protocol(_)));
}

#[test]
fn layers_for_unknown_slides_are_dropped() {
    let mut c = compositor(deck(1), false);
    c.on_layer(&png("nope", LayerGroup::DrawPage, 0, "x"), None)
        .unwrap();
    assert_eq!(c.cached_slide_count(), 0);
}

#[test]
fn invalidate_all_forces_a_refetch() {
    let mut c = compositor(deck(1), false);
    c.request_slide(0, ReadyTicket(1)).unwrap();
    finish_empty_slide(&mut c, "s0");
    c.take_ready();

    c.invalidate_all();
    assert!(c.slide_image(0).is_none());
    c.request_slide(0, ReadyTicket(2)).unwrap();
    assert_eq!(c.sink().sent().len(), 2);
}

#[test]
fn larger_viewport_switches_resolution_and_drops_cache() {
    let mut c = SlideCompositor::new(
        Arc::new(deck(1)),
        size(16, 9),
        CompositorOpts {
            prefetch: false,
            resolutions: vec![size(16, 9), size(32, 18)],
            ..CompositorOpts::default()
        },
        InMemoryFetchSink::new(),
    )
    .unwrap();
    c.request_slide(0, ReadyTicket(1)).unwrap();
    finish_empty_slide(&mut c, "s0");
    assert!(c.slide_image(0).is_some());

    let info = Arc::clone(c.presentation());
    c.on_update_presentation_info(Arc::clone(&info), size(16, 9))
        .unwrap();
    assert!(c.slide_image(0).is_some());

    c.on_update_presentation_info(info, size(30, 15)).unwrap();
    assert_eq!(c.canvas_size(), size(32, 18));
    assert!(c.slide_image(0).is_none());
}
