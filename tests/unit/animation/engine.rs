use super::*;
use crate::model::layer::ShapeContentKind;
use crate::model::presentation::Bounds;
use serde_json::json;

fn shapes() -> Vec<AnimatedShapeInfo> {
    vec![AnimatedShapeInfo {
        hash: "a".to_owned(),
        init_visible: false,
        kind: ShapeContentKind::Bitmap,
        bounds: Bounds {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 10.0,
        },
        checksum: None,
    }]
}

fn fade_in(trigger: &str) -> EffectSpec {
    serde_json::from_value(json!({
        "trigger": trigger,
        "animations": [
            { "shape": "a", "kind": "set", "attribute": "visibility", "to": "visible" },
            { "shape": "a", "kind": "property", "attribute": "opacity", "from": 0.0, "to": 1.0, "durationMs": 100 }
        ]
    }))
    .unwrap()
}

fn move_right(trigger: &str) -> EffectSpec {
    serde_json::from_value(json!({
        "trigger": trigger,
        "animations": [
            { "shape": "a", "kind": "property", "attribute": "x", "by": 0.1, "durationMs": 100 }
        ]
    }))
    .unwrap()
}

fn slide(effects: Vec<EffectSpec>) -> SlideInfo {
    let mut s = SlideInfo::new("s0", 0, "m0");
    s.effects = effects;
    s
}

fn with_fade_transition(mut s: SlideInfo) -> SlideInfo {
    s.transition = Some(
        serde_json::from_value(json!({ "type": "fade", "subtype": "crossfade", "durationMs": 200 }))
            .unwrap(),
    );
    s
}

fn loaded(s: &SlideInfo, play_transition: bool) -> AnimationEngine {
    let mut engine = AnimationEngine::new(EngineOpts::default());
    engine
        .start_slide(s, &shapes(), Size::new(100.0, 50.0), play_transition)
        .unwrap();
    engine
}

fn a(engine: &AnimationEngine) -> &ShapeState {
    engine.shape("a").unwrap().state()
}

#[test]
fn click_effect_plays_to_completion() {
    let mut engine = loaded(&slide(vec![fade_in("onClick")]), false);
    assert_eq!(engine.effect_count(), 1);
    assert!(!engine.effects_done());
    assert!(!a(&engine).visible);

    assert!(engine.next_effect().unwrap());
    assert!(engine.is_effect_playing());
    assert!(a(&engine).visible);
    assert_eq!(a(&engine).opacity, 0.0);

    engine.tick(Millis(50)).unwrap();
    assert!((a(&engine).opacity - 0.5).abs() < 1e-9);

    engine.tick(Millis(100)).unwrap();
    assert!(!engine.is_effect_playing());
    assert_eq!(a(&engine).opacity, 1.0);
    assert!(engine.effects_done());
    assert!(!engine.shape("a").unwrap().is_animating());

    assert!(!engine.next_effect().unwrap());
}

#[test]
fn next_effect_while_playing_skips_it() {
    let mut engine = loaded(&slide(vec![fade_in("onClick"), fade_in("onClick")]), false);
    engine.next_effect().unwrap();
    engine.tick(Millis(10)).unwrap();

    assert!(engine.next_effect().unwrap());
    assert!(!engine.is_effect_playing());
    assert_eq!(engine.effect_cursor(), 1);
    assert_eq!(a(&engine).opacity, 1.0);
}

#[test]
fn after_previous_effects_chain_inside_one_step() {
    let mut engine = loaded(&slide(vec![fade_in("onClick"), move_right("afterPrevious")]), false);
    assert_eq!(engine.effect_count(), 1);

    engine.next_effect().unwrap();
    engine.tick(Millis(100)).unwrap();
    assert!(engine.is_effect_playing());
    assert_eq!(a(&engine).center.x, 20.0);

    engine.tick(Millis(150)).unwrap();
    assert!((a(&engine).center.x - 25.0).abs() < 1e-9);

    engine.tick(Millis(200)).unwrap();
    assert!(!engine.is_effect_playing());
    assert!((a(&engine).center.x - 30.0).abs() < 1e-9);
}

#[test]
fn leading_after_previous_effect_starts_on_entry() {
    let mut engine = loaded(&slide(vec![fade_in("afterPrevious"), move_right("onClick")]), false);
    assert_eq!(engine.effect_count(), 2);
    assert_eq!(engine.effect_cursor(), 1);
    assert!(engine.is_effect_playing());

    engine.tick(Millis(100)).unwrap();
    assert!(!engine.is_effect_playing());
    assert!(!engine.effects_done());
}

#[test]
fn transition_runs_before_automatic_effect() {
    let s = with_fade_transition(slide(vec![fade_in("afterPrevious")]));
    let mut engine = loaded(&s, true);
    assert!(engine.is_transition_playing());
    assert_eq!(engine.effect_cursor(), 0);
    assert_eq!(engine.shape(SLIDE_SHAPE_ID).unwrap().state().opacity, 0.0);

    engine.tick(Millis(100)).unwrap();
    assert!((engine.shape(SLIDE_SHAPE_ID).unwrap().state().opacity - 0.5).abs() < 1e-9);

    engine.tick(Millis(200)).unwrap();
    assert!(!engine.is_transition_playing());
    assert_eq!(engine.shape(SLIDE_SHAPE_ID).unwrap().state().opacity, 1.0);
    assert_eq!(engine.effect_cursor(), 1);
    assert!(engine.is_effect_playing());
}

#[test]
fn next_effect_skips_running_transition() {
    let s = with_fade_transition(slide(vec![fade_in("onClick")]));
    let mut engine = loaded(&s, true);
    assert!(engine.next_effect().unwrap());
    assert!(!engine.is_transition_playing());
    assert_eq!(engine.shape(SLIDE_SHAPE_ID).unwrap().state().opacity, 1.0);
    assert_eq!(engine.effect_cursor(), 0);
}

#[test]
fn transition_is_not_played_when_skipped_or_disabled() {
    let s = with_fade_transition(slide(vec![]));
    assert!(!loaded(&s, false).is_transition_playing());

    let mut engine = AnimationEngine::new(EngineOpts { transitions: false });
    engine
        .start_slide(&s, &shapes(), Size::new(100.0, 50.0), true)
        .unwrap();
    assert!(!engine.is_transition_playing());
    assert!(engine.effects_done());
}

#[test]
fn skip_jumps_next_effect_to_its_end_state() {
    let mut engine = loaded(&slide(vec![fade_in("onClick")]), false);
    assert!(engine.skip_playing_or_next_effect().unwrap());
    assert!(!engine.is_effect_playing());
    assert!(a(&engine).visible);
    assert_eq!(a(&engine).opacity, 1.0);
    assert!(!engine.skip_playing_or_next_effect().unwrap());
}

#[test]
fn skip_all_settles_every_effect() {
    let mut engine = loaded(&slide(vec![fade_in("onClick"), move_right("onClick")]), false);
    assert!(engine.skip_all_effects().unwrap());
    assert_eq!(engine.effect_cursor(), 2);
    assert!(engine.effects_done());
    assert!((a(&engine).center.x - 30.0).abs() < 1e-9);
    assert!(!engine.skip_all_effects().unwrap());
}

#[test]
fn rewind_restores_the_state_before_the_effect() {
    let mut engine = loaded(&slide(vec![fade_in("onClick")]), false);
    engine.next_effect().unwrap();
    engine.tick(Millis(100)).unwrap();

    assert_eq!(engine.rewind_effect().unwrap(), RewindOutcome::Rewound);
    assert_eq!(engine.effect_cursor(), 0);
    assert!(!a(&engine).visible);
    assert_eq!(a(&engine).opacity, 1.0);

    assert_eq!(
        engine.rewind_effect().unwrap(),
        RewindOutcome::ToPreviousSlide
    );
}

#[test]
fn rewind_cancels_a_playing_effect_and_its_timers() {
    let delayed: EffectSpec = serde_json::from_value(json!({
        "animations": [
            { "shape": "a", "kind": "property", "attribute": "opacity", "to": 0.0, "durationMs": 100 },
            { "shape": "a", "kind": "set", "attribute": "visibility", "to": "visible", "beginMs": 50 }
        ]
    }))
    .unwrap();
    let mut engine = loaded(&slide(vec![delayed]), false);
    engine.next_effect().unwrap();
    engine.tick(Millis(10)).unwrap();

    engine.rewind_effect().unwrap();
    assert!(!engine.is_effect_playing());
    assert!(!engine.shape("a").unwrap().is_animating());
    assert_eq!(a(&engine).opacity, 1.0);

    engine.tick(Millis(60)).unwrap();
    assert!(!a(&engine).visible);
}

#[test]
fn rewind_all_undoes_every_step() {
    let mut engine = loaded(&slide(vec![fade_in("onClick"), move_right("onClick")]), false);
    engine.skip_all_effects().unwrap();
    assert_eq!(engine.rewind_all_effects().unwrap(), RewindOutcome::Rewound);
    assert_eq!(engine.effect_cursor(), 0);
    assert_eq!(a(&engine).center.x, 20.0);
    assert!(!a(&engine).visible);
}

#[test]
fn rewind_during_transition_goes_to_previous_slide() {
    let s = with_fade_transition(slide(vec![]));
    let mut engine = loaded(&s, true);
    assert_eq!(
        engine.rewind_effect().unwrap(),
        RewindOutcome::ToPreviousSlide
    );
    assert!(!engine.is_transition_playing());
}

#[test]
fn animations_of_unknown_shapes_are_dropped() {
    let ghost: EffectSpec = serde_json::from_value(json!({
        "animations": [
            { "shape": "ghost", "kind": "property", "attribute": "opacity", "to": 0.0, "durationMs": 100 }
        ]
    }))
    .unwrap();
    let mut engine = loaded(&slide(vec![ghost]), false);
    assert!(engine.next_effect().unwrap());
    assert!(!engine.is_effect_playing());
    assert!(engine.effects_done());
}

#[test]
fn malformed_tuple_animation_does_not_wedge_the_effect() {
    let grow: EffectSpec = serde_json::from_value(json!({
        "trigger": "onClick",
        "animations": [
            { "shape": "a", "kind": "property", "attribute": "scale", "to": [2.0, 2.0, 2.0], "durationMs": 100 },
            { "shape": "a", "kind": "property", "attribute": "opacity", "from": 0.0, "to": 1.0, "durationMs": 100 }
        ]
    }))
    .unwrap();
    let mut engine = loaded(&slide(vec![grow]), false);

    assert!(engine.next_effect().unwrap());
    engine.tick(Millis(10)).unwrap();
    engine.tick(Millis(5000)).unwrap();
    assert!(!engine.is_effect_playing());
    assert!(engine.effects_done());
    assert_eq!(a(&engine).opacity, 1.0);
    assert_eq!(a(&engine).scale_x, 1.0);
}
