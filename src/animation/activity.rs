//! Timed drivers that feed an [`Animation`] with eased, interpolated values.

use tracing::debug;

use crate::animation::anim::Animation;
use crate::animation::ease::Ease;
use crate::animation::shape::{AnimatedShape, SLIDE_SHAPE_ID};
use crate::animation::value::PropertyValue;
use crate::foundation::color::{ClockDirection, ColorSpace};
use crate::foundation::core::Millis;
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::model::effect::{AnimationKind, AnimationSpec, TransitionFilterInfo};

/// Lifecycle of an [`Activity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityState {
    /// Waiting for its begin time.
    Pending,
    /// Started; values are being written.
    Running,
    /// Ended, either naturally, skipped or cancelled.
    Ended,
}

#[derive(Clone, Debug)]
enum Values {
    FromToBy {
        from: Option<PropertyValue>,
        to: Option<PropertyValue>,
        by: Option<PropertyValue>,
        space: ColorSpace,
        direction: ClockDirection,
    },
    Set(PropertyValue),
    Sweep,
}

/// One animation of one shape, scheduled relative to the start of its effect.
#[derive(Clone, Debug)]
pub struct Activity {
    shape: String,
    animation: Animation,
    values: Values,
    begin_ms: u64,
    duration_ms: u64,
    ease: Ease,
    range: Option<(PropertyValue, PropertyValue)>,
    started_at: Millis,
    state: ActivityState,
}

impl Activity {
    /// Build the activity described by `spec` for `shape`.
    ///
    /// Unknown attributes yield `Ok(None)`; values that do not fit the attribute are errors.
    pub fn from_spec(spec: &AnimationSpec, shape: &AnimatedShape) -> SlideShowResult<Option<Self>> {
        let (animation, values) = match &spec.kind {
            AnimationKind::Property {
                attribute,
                from,
                to,
                by,
                color_space,
                direction,
            } => {
                let Some(animation) = Animation::for_attribute(attribute, shape) else {
                    return Ok(None);
                };
                if to.is_none() && by.is_none() {
                    return Err(SlideShowError::animation(format!(
                        "animation of {attribute} on {} needs `to` or `by`",
                        spec.shape
                    )));
                }
                let ty = animation.value_type();
                let parse = |v: &Option<serde_json::Value>| {
                    v.as_ref()
                        .map(|v| PropertyValue::from_json(ty, v))
                        .transpose()
                };
                let (from, to, by) = (parse(from)?, parse(to)?, parse(by)?);
                for value in [&from, &to, &by].into_iter().flatten() {
                    check_arity(&animation, value)?;
                }
                let values = Values::FromToBy {
                    from,
                    to,
                    by,
                    space: *color_space,
                    direction: *direction,
                };
                (animation, values)
            }
            AnimationKind::Set { attribute, to } => {
                let Some(animation) = Animation::for_attribute(attribute, shape) else {
                    return Ok(None);
                };
                let value = PropertyValue::from_json(animation.value_type(), to)?;
                check_arity(&animation, &value)?;
                (animation, Values::Set(value))
            }
            AnimationKind::TransitionFilter { transition } => {
                (Animation::transition_filter(*transition), Values::Sweep)
            }
        };
        Ok(Some(Self {
            shape: spec.shape.clone(),
            animation,
            values,
            begin_ms: spec.begin_ms,
            duration_ms: spec.duration_ms,
            ease: spec.ease,
            range: None,
            started_at: Millis::ZERO,
            state: ActivityState::Pending,
        }))
    }

    /// Slide transition sweeping the slide pseudo-shape over `duration_ms`.
    pub fn slide_transition(filter: TransitionFilterInfo, duration_ms: u64) -> Self {
        Self {
            shape: SLIDE_SHAPE_ID.to_owned(),
            animation: Animation::transition_filter(filter),
            values: Values::Sweep,
            begin_ms: 0,
            duration_ms,
            ease: Ease::Linear,
            range: None,
            started_at: Millis::ZERO,
            state: ActivityState::Pending,
        }
    }

    /// Id of the animated shape.
    pub fn shape_id(&self) -> &str {
        &self.shape
    }

    /// Delay from the start of the owning effect.
    pub fn begin_ms(&self) -> u64 {
        self.begin_ms
    }

    /// Active duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// The driven animation.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Start at time `at`, resolving the value range against the shape's current state.
    ///
    /// With `from` absent the underlying value is the start; `by` is added to the start when
    /// `to` is absent. A failed start leaves the activity ended.
    pub fn start(&mut self, shape: &mut AnimatedShape, at: Millis) -> SlideShowResult<()> {
        if self.state != ActivityState::Pending {
            return Ok(());
        }
        self.animation.start(shape);
        self.started_at = at;
        self.state = ActivityState::Running;

        let range = match self.resolve_range(shape) {
            Ok(range) => range,
            Err(err) => {
                self.finish(shape);
                return Err(err);
            }
        };
        debug!(shape = %self.shape, at = at.0, "activity started");
        self.range = Some(range);
        Ok(())
    }

    fn resolve_range(
        &mut self,
        shape: &mut AnimatedShape,
    ) -> SlideShowResult<(PropertyValue, PropertyValue)> {
        let range = match &self.values {
            Values::FromToBy { from, to, by, .. } => {
                let start = match from {
                    Some(from) => from.clone(),
                    None => self.animation.underlying_value(shape)?,
                };
                let end = match (to, by) {
                    (Some(to), _) => to.clone(),
                    (None, Some(by)) => start.add(by)?,
                    (None, None) => {
                        return Err(SlideShowError::contract(
                            "from/to/by activity without an end value",
                        ));
                    }
                };
                (start, end)
            }
            Values::Set(value) => (value.clone(), value.clone()),
            Values::Sweep => (PropertyValue::Number(0.0), PropertyValue::Number(1.0)),
        };
        self.animation.perform(shape, &range.0)?;
        Ok(range)
    }

    /// Write the value for `now`; returns `true` once the activity has ended.
    pub fn perform_at(&mut self, shape: &mut AnimatedShape, now: Millis) -> SlideShowResult<bool> {
        match self.state {
            ActivityState::Pending => return Ok(false),
            ActivityState::Ended => return Ok(true),
            ActivityState::Running => {}
        }
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            (now.since(self.started_at) as f64 / self.duration_ms as f64).min(1.0)
        };
        if let Err(err) = self.apply(shape, t) {
            self.finish(shape);
            return Err(err);
        }
        if t >= 1.0 {
            self.finish(shape);
            return Ok(true);
        }
        Ok(false)
    }

    /// Jump to the end value and end, starting first if needed.
    pub fn skip(&mut self, shape: &mut AnimatedShape) -> SlideShowResult<()> {
        if self.state == ActivityState::Pending {
            self.start(shape, self.started_at)?;
        }
        if self.state == ActivityState::Running {
            let applied = self.apply(shape, 1.0);
            self.finish(shape);
            applied?;
        }
        Ok(())
    }

    /// End without writing the end value. The caller restores the shape state.
    pub fn cancel(&mut self, shape: &mut AnimatedShape) {
        if self.state == ActivityState::Running {
            self.animation.end(shape);
        }
        self.state = ActivityState::Ended;
    }

    fn apply(&mut self, shape: &mut AnimatedShape, t: f64) -> SlideShowResult<()> {
        let Some((from, to)) = &self.range else {
            return Ok(());
        };
        let (space, direction) = match self.values {
            Values::FromToBy {
                space, direction, ..
            } => (space, direction),
            _ => (ColorSpace::default(), ClockDirection::default()),
        };
        let value = from.interpolate(to, self.ease.apply(t), space, direction)?;
        self.animation.perform(shape, &value)
    }

    fn finish(&mut self, shape: &mut AnimatedShape) {
        self.animation.end(shape);
        self.state = ActivityState::Ended;
    }
}

/// Tuple values must carry as many components as the attribute's reference size.
fn check_arity(animation: &Animation, value: &PropertyValue) -> SlideShowResult<()> {
    if let (Animation::Tuple(tuple), PropertyValue::Tuple(v)) = (animation, value)
        && v.len() != tuple.reference().len()
    {
        return Err(SlideShowError::contract(format!(
            "tuple attribute takes {} components, got {}",
            tuple.reference().len(),
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/activity.rs"]
mod tests;
