//! The animation strategies. Each one is driven through the same lifecycle:
//! `start` (idempotent), any number of `perform` calls, then `end` (effective once).

use smallvec::smallvec;
use tracing::debug;

use crate::animation::property::{PropertyDescriptor, property};
use crate::animation::shape::AnimatedShape;
use crate::animation::transitions::FilterRenderer;
use crate::animation::value::{PropertyValue, Tuple, ValueType};
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::model::effect::{TransitionFilterInfo, TransitionMode};

/// An animation bound to one attribute or filter of a shape. The shape itself is passed into
/// every call.
#[derive(Clone, Debug)]
pub enum Animation {
    /// Scalar, color or keyword attribute written through the property table.
    Property(PropertyAnimation),
    /// Two-component attribute normalized against a reference size.
    Tuple(TupleAnimation),
    /// Transition filter revealing or hiding the shape.
    TransitionFilter(TransitionFilterAnimation),
}

impl Animation {
    /// Animation for `attribute` on `shape`; `None` (logged) for unknown attributes.
    pub fn for_attribute(attribute: &str, shape: &AnimatedShape) -> Option<Self> {
        let Some(descriptor) = property(attribute) else {
            debug!(attribute, "attribute is unknown");
            return None;
        };
        Some(match descriptor.value_type {
            ValueType::Tuple => Self::Tuple(TupleAnimation::new(descriptor, shape)?),
            _ => Self::Property(PropertyAnimation::new(descriptor)),
        })
    }

    /// Transition filter animation; its renderer is built on first `start`.
    pub fn transition_filter(filter: TransitionFilterInfo) -> Self {
        Self::TransitionFilter(TransitionFilterAnimation::new(filter))
    }

    /// Type of the values `perform` accepts.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Property(a) => a.descriptor.value_type,
            Self::Tuple(_) => ValueType::Tuple,
            Self::TransitionFilter(_) => ValueType::Number,
        }
    }

    /// Bind to `shape`. Calling it again while started does nothing.
    pub fn start(&mut self, shape: &mut AnimatedShape) {
        let started = match self {
            Self::Property(a) => &mut a.started,
            Self::Tuple(a) => &mut a.started,
            Self::TransitionFilter(a) => {
                if a.started {
                    return;
                }
                a.renderer = FilterRenderer::for_filter(&a.filter);
                &mut a.started
            }
        };
        if !*started {
            *started = true;
            shape.notify_animation_start();
        }
    }

    /// Write `value` to the shape.
    pub fn perform(
        &mut self,
        shape: &mut AnimatedShape,
        value: &PropertyValue,
    ) -> SlideShowResult<()> {
        match self {
            Self::Property(a) => a.descriptor.write(shape, value),
            Self::Tuple(a) => a.perform(shape, value),
            Self::TransitionFilter(a) => a.perform(shape, value),
        }
    }

    /// Unbind from `shape`. Only the first call after a `start` has an effect.
    pub fn end(&mut self, shape: &mut AnimatedShape) {
        let started = match self {
            Self::Property(a) => &mut a.started,
            Self::Tuple(a) => &mut a.started,
            Self::TransitionFilter(a) => {
                if a.started {
                    a.finish(shape);
                }
                &mut a.started
            }
        };
        if *started {
            *started = false;
            shape.notify_animation_end();
        }
    }

    /// Current value of the animated attribute, in the units `perform` takes.
    pub fn underlying_value(&self, shape: &AnimatedShape) -> SlideShowResult<PropertyValue> {
        match self {
            Self::Property(a) => Ok(a.descriptor.read(shape)),
            Self::Tuple(a) => a.underlying_value(shape),
            Self::TransitionFilter(a) => Ok(PropertyValue::Number(a.progress)),
        }
    }

    /// Return `true` between `start` and `end`.
    pub fn is_started(&self) -> bool {
        match self {
            Self::Property(a) => a.started,
            Self::Tuple(a) => a.started,
            Self::TransitionFilter(a) => a.started,
        }
    }
}

/// Direct attribute animation.
#[derive(Clone, Debug)]
pub struct PropertyAnimation {
    descriptor: &'static PropertyDescriptor,
    started: bool,
}

impl PropertyAnimation {
    fn new(descriptor: &'static PropertyDescriptor) -> Self {
        Self {
            descriptor,
            started: false,
        }
    }
}

/// Tuple attribute animation; values are fractions of `reference`.
#[derive(Clone, Debug)]
pub struct TupleAnimation {
    descriptor: &'static PropertyDescriptor,
    reference: Tuple,
    started: bool,
}

impl TupleAnimation {
    fn new(descriptor: &'static PropertyDescriptor, shape: &AnimatedShape) -> Option<Self> {
        let reference: Tuple = match descriptor.name {
            "scale" => {
                let base = shape.base_bbox();
                smallvec![base.width(), base.height()]
            }
            "translate" => {
                let slide = shape.slide_size();
                smallvec![slide.width, slide.height]
            }
            other => {
                debug!(attribute = other, "tuple attribute is not handled");
                return None;
            }
        };
        Some(Self {
            descriptor,
            reference,
            started: false,
        })
    }

    /// Reference size values are normalized against.
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    fn perform(&self, shape: &mut AnimatedShape, value: &PropertyValue) -> SlideShowResult<()> {
        let PropertyValue::Tuple(norm) = value else {
            return Err(SlideShowError::contract(format!(
                "{} expects a tuple, got {value:?}",
                self.descriptor.name
            )));
        };
        self.check_len(norm.len())?;
        let scaled = norm.iter().zip(&self.reference).map(|(v, r)| v * r).collect();
        self.descriptor.write(shape, &PropertyValue::Tuple(scaled))
    }

    fn underlying_value(&self, shape: &AnimatedShape) -> SlideShowResult<PropertyValue> {
        let PropertyValue::Tuple(raw) = self.descriptor.read(shape) else {
            return Err(SlideShowError::contract(format!(
                "{} did not read back a tuple",
                self.descriptor.name
            )));
        };
        self.check_len(raw.len())?;
        Ok(PropertyValue::Tuple(
            raw.iter().zip(&self.reference).map(|(v, r)| v / r).collect(),
        ))
    }

    fn check_len(&self, len: usize) -> SlideShowResult<()> {
        if len != self.reference.len() {
            return Err(SlideShowError::contract(format!(
                "{} takes {} components, got {len}",
                self.descriptor.name,
                self.reference.len()
            )));
        }
        Ok(())
    }
}

/// Transition filter animation; values are sweep progress in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct TransitionFilterAnimation {
    filter: TransitionFilterInfo,
    renderer: Option<FilterRenderer>,
    progress: f64,
    started: bool,
}

impl TransitionFilterAnimation {
    fn new(filter: TransitionFilterInfo) -> Self {
        Self {
            filter,
            renderer: None,
            progress: 0.0,
            started: false,
        }
    }

    /// Filter description.
    pub fn filter(&self) -> &TransitionFilterInfo {
        &self.filter
    }

    /// Return `true` while a renderer is held.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    fn perform(&mut self, shape: &mut AnimatedShape, value: &PropertyValue) -> SlideShowResult<()> {
        let t = value.as_number().ok_or_else(|| {
            SlideShowError::contract(format!("transition progress must be a number, got {value:?}"))
        })?;
        self.progress = t.clamp(0.0, 1.0);
        if let Some(renderer) = &self.renderer {
            renderer.apply(shape, self.progress);
        }
        Ok(())
    }

    /// Drop the renderer and leave the shape in its final state.
    fn finish(&mut self, shape: &mut AnimatedShape) {
        if self.renderer.take().is_none() {
            return;
        }
        let state = shape.state_mut();
        state.clip = None;
        if self.filter.mode == TransitionMode::Out {
            state.visible = false;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
