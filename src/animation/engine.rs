//! Main-sequence playback for the current slide.
//!
//! Effects are grouped into steps: a step is an on-click effect followed by every
//! after-previous effect behind it. Leading after-previous effects form a step that starts by
//! itself once the slide transition is over. The effect cursor counts started steps.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::animation::activity::Activity;
use crate::animation::shape::{AnimatedShape, SLIDE_SHAPE_ID, ShapeState};
use crate::config::EngineOpts;
use crate::foundation::core::{Millis, Size};
use crate::foundation::error::SlideShowResult;
use crate::foundation::queue::PriorityQueue;
use crate::model::effect::{EffectSpec, EffectTrigger};
use crate::model::layer::AnimatedShapeInfo;
use crate::model::presentation::SlideInfo;
use crate::navigator::sequencer::{EffectSequencer, RewindOutcome};

#[derive(Clone, Copy, Debug)]
struct TimerEvent {
    generation: u64,
    activity: usize,
    at: Millis,
}

#[derive(Debug)]
struct PlayingStep {
    step: usize,
    next_effect: usize,
    activities: Vec<Activity>,
}

/// Concrete [`EffectSequencer`] driving [`Activity`] values against the slide's shapes.
#[derive(Debug)]
pub struct AnimationEngine {
    opts: EngineOpts,
    shapes: BTreeMap<String, AnimatedShape>,
    steps: Vec<Vec<EffectSpec>>,
    auto_first: bool,
    cursor: usize,
    // One snapshot of every shape per started step, taken before the step ran.
    started: Vec<BTreeMap<String, ShapeState>>,
    playing: Option<PlayingStep>,
    transition: Option<Activity>,
    timers: PriorityQueue<TimerEvent>,
    generation: u64,
    now: Millis,
}

impl AnimationEngine {
    /// Engine with no slide loaded.
    pub fn new(opts: EngineOpts) -> Self {
        Self {
            opts,
            shapes: BTreeMap::new(),
            steps: Vec::new(),
            auto_first: false,
            cursor: 0,
            started: Vec::new(),
            playing: None,
            transition: None,
            timers: PriorityQueue::new(),
            generation: 0,
            now: Millis::ZERO,
        }
    }

    /// Animated state of shape `id`; the slide itself is [`SLIDE_SHAPE_ID`].
    pub fn shape(&self, id: &str) -> Option<&AnimatedShape> {
        self.shapes.get(id)
    }

    /// Every shape of the current slide.
    pub fn shapes(&self) -> impl Iterator<Item = &AnimatedShape> {
        self.shapes.values()
    }

    /// Number of steps started on the current slide.
    pub fn effect_cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the current slide's main sequence.
    pub fn effect_count(&self) -> usize {
        self.steps.len()
    }

    /// Return `true` while a step is playing.
    pub fn is_effect_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Last time passed to `tick`.
    pub fn now(&self) -> Millis {
        self.now
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.timers.clear();
        self.playing = None;
        self.transition = None;
        self.started.clear();
        self.cursor = 0;
    }

    fn begin_effects(&mut self) -> SlideShowResult<()> {
        if self.auto_first && self.cursor == 0 && self.started.is_empty() {
            debug!("starting automatic effect");
            self.fire_step()?;
        }
        Ok(())
    }

    fn fire_step(&mut self) -> SlideShowResult<()> {
        let step = self.cursor;
        self.cursor += 1;
        self.started.push(
            self.shapes
                .iter()
                .map(|(id, shape)| (id.clone(), shape.snapshot()))
                .collect(),
        );
        self.playing = Some(PlayingStep {
            step,
            next_effect: 0,
            activities: Vec::new(),
        });
        debug!(step, "effect started");
        self.start_next_effect();
        self.process()
    }

    /// Queue the activities of the next effect in the playing step. `false` when the step has
    /// no effect left.
    fn start_next_effect(&mut self) -> bool {
        let Some(playing) = self.playing.as_mut() else {
            return false;
        };
        let Some(effect) = self
            .steps
            .get(playing.step)
            .and_then(|s| s.get(playing.next_effect))
        else {
            return false;
        };
        playing.next_effect += 1;
        self.generation += 1;
        playing.activities = build_activities(&self.shapes, effect);
        for (i, activity) in playing.activities.iter().enumerate() {
            let at = self.now.after(activity.begin_ms());
            self.timers.push(
                at.0 as f64,
                TimerEvent {
                    generation: self.generation,
                    activity: i,
                    at,
                },
            );
        }
        true
    }

    fn process(&mut self) -> SlideShowResult<()> {
        let now = self.now;
        loop {
            let done = {
                let Some(playing) = self.playing.as_mut() else {
                    return Ok(());
                };
                while let Some(entry) = self.timers.pop_due(now.0 as f64) {
                    let ev = entry.into_value();
                    if ev.generation != self.generation {
                        continue;
                    }
                    if let Some(activity) = playing.activities.get_mut(ev.activity)
                        && let Some(shape) = self.shapes.get_mut(activity.shape_id())
                    {
                        activity.start(shape, ev.at)?;
                    }
                }
                let mut done = true;
                for activity in &mut playing.activities {
                    if let Some(shape) = self.shapes.get_mut(activity.shape_id()) {
                        done &= activity.perform_at(shape, now)?;
                    }
                }
                done
            };
            if !done {
                return Ok(());
            }
            if !self.start_next_effect() {
                if let Some(playing) = self.playing.take() {
                    debug!(step = playing.step, "effect finished");
                }
                return Ok(());
            }
        }
    }

    fn skip_transition(&mut self) -> SlideShowResult<()> {
        if let Some(mut transition) = self.transition.take()
            && let Some(shape) = self.shapes.get_mut(SLIDE_SHAPE_ID)
        {
            transition.skip(shape)?;
            debug!("slide transition skipped");
        }
        self.begin_effects()
    }

    fn skip_playing(&mut self) -> SlideShowResult<()> {
        let Some(mut playing) = self.playing.take() else {
            return Ok(());
        };
        self.generation += 1;
        loop {
            for activity in &mut playing.activities {
                if let Some(shape) = self.shapes.get_mut(activity.shape_id()) {
                    activity.skip(shape)?;
                }
            }
            let Some(effect) = self
                .steps
                .get(playing.step)
                .and_then(|s| s.get(playing.next_effect))
            else {
                break;
            };
            playing.next_effect += 1;
            playing.activities = build_activities(&self.shapes, effect);
        }
        debug!(step = playing.step, "effect skipped");
        Ok(())
    }
}

impl EffectSequencer for AnimationEngine {
    #[tracing::instrument(skip_all, fields(slide = %slide.hash))]
    fn start_slide(
        &mut self,
        slide: &SlideInfo,
        shapes: &[AnimatedShapeInfo],
        slide_size: Size,
        play_transition: bool,
    ) -> SlideShowResult<()> {
        self.reset();
        self.shapes = shapes
            .iter()
            .map(|info| (info.hash.clone(), AnimatedShape::from_info(info, slide_size)))
            .collect();
        self.shapes
            .insert(SLIDE_SHAPE_ID.to_owned(), AnimatedShape::slide(slide_size));
        self.steps = group_steps(&slide.effects);
        self.auto_first = slide
            .effects
            .first()
            .is_some_and(|e| e.trigger == EffectTrigger::AfterPrevious);
        info!(steps = self.steps.len(), shapes = shapes.len(), "slide loaded");

        match slide.transition {
            Some(t) if play_transition && self.opts.transitions => {
                let mut activity = Activity::slide_transition(t.filter, t.duration_ms);
                if let Some(shape) = self.shapes.get_mut(SLIDE_SHAPE_ID) {
                    activity.start(shape, self.now)?;
                }
                self.transition = Some(activity);
                Ok(())
            }
            _ => self.begin_effects(),
        }
    }

    fn next_effect(&mut self) -> SlideShowResult<bool> {
        if self.transition.is_some() {
            self.skip_transition()?;
            return Ok(true);
        }
        if self.playing.is_some() {
            self.skip_playing()?;
            return Ok(true);
        }
        if self.cursor >= self.steps.len() {
            return Ok(false);
        }
        self.fire_step()?;
        Ok(true)
    }

    fn skip_playing_or_next_effect(&mut self) -> SlideShowResult<bool> {
        if self.transition.is_some() {
            self.skip_transition()?;
            return Ok(true);
        }
        if self.playing.is_some() {
            self.skip_playing()?;
            return Ok(true);
        }
        if self.cursor >= self.steps.len() {
            return Ok(false);
        }
        self.fire_step()?;
        self.skip_playing()?;
        Ok(true)
    }

    fn skip_all_effects(&mut self) -> SlideShowResult<bool> {
        if self.transition.is_some() {
            self.skip_transition()?;
        }
        if self.playing.is_some() {
            self.skip_playing()?;
        } else if self.cursor >= self.steps.len() {
            return Ok(false);
        }
        while self.cursor < self.steps.len() {
            self.fire_step()?;
            self.skip_playing()?;
        }
        Ok(true)
    }

    fn rewind_effect(&mut self) -> SlideShowResult<RewindOutcome> {
        let Some(snapshot) = self.started.pop() else {
            // Rewinding into a running transition abandons the slide.
            if let Some(mut transition) = self.transition.take()
                && let Some(shape) = self.shapes.get_mut(SLIDE_SHAPE_ID)
            {
                transition.cancel(shape);
            }
            return Ok(RewindOutcome::ToPreviousSlide);
        };
        self.generation += 1;
        if let Some(mut playing) = self.playing.take() {
            for activity in &mut playing.activities {
                if let Some(shape) = self.shapes.get_mut(activity.shape_id()) {
                    activity.cancel(shape);
                }
            }
        }
        for (id, state) in snapshot {
            if let Some(shape) = self.shapes.get_mut(&id) {
                shape.restore(state);
            }
        }
        self.cursor = self.cursor.saturating_sub(1);
        info!(cursor = self.cursor, "effect rewound");
        Ok(RewindOutcome::Rewound)
    }

    fn rewind_all_effects(&mut self) -> SlideShowResult<RewindOutcome> {
        if self.started.is_empty() {
            return self.rewind_effect();
        }
        while !self.started.is_empty() {
            self.rewind_effect()?;
        }
        Ok(RewindOutcome::Rewound)
    }

    fn is_transition_playing(&self) -> bool {
        self.transition.is_some()
    }

    fn effects_done(&self) -> bool {
        self.transition.is_none() && self.playing.is_none() && self.cursor >= self.steps.len()
    }

    fn tick(&mut self, now: Millis) -> SlideShowResult<()> {
        self.now = now;
        if let Some(transition) = self.transition.as_mut() {
            let done = match self.shapes.get_mut(SLIDE_SHAPE_ID) {
                Some(shape) => transition.perform_at(shape, now)?,
                None => true,
            };
            if !done {
                return Ok(());
            }
            self.transition = None;
            debug!("slide transition finished");
            self.begin_effects()?;
        }
        self.process()
    }
}

fn group_steps(effects: &[EffectSpec]) -> Vec<Vec<EffectSpec>> {
    let mut steps: Vec<Vec<EffectSpec>> = Vec::new();
    for effect in effects {
        match (effect.trigger, steps.last_mut()) {
            (EffectTrigger::AfterPrevious, Some(step)) => step.push(effect.clone()),
            _ => steps.push(vec![effect.clone()]),
        }
    }
    steps
}

fn build_activities(
    shapes: &BTreeMap<String, AnimatedShape>,
    effect: &EffectSpec,
) -> Vec<Activity> {
    let mut out = Vec::with_capacity(effect.animations.len());
    for spec in &effect.animations {
        let Some(shape) = shapes.get(&spec.shape) else {
            warn!(shape = %spec.shape, "animated shape is unknown");
            continue;
        };
        match Activity::from_spec(spec, shape) {
            Ok(Some(activity)) => out.push(activity),
            Ok(None) => {}
            Err(err) => warn!(shape = %spec.shape, %err, "animation skipped"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
