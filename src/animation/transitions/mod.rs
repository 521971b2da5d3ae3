//! Transition filters: table lookup plus the renderer each table class maps to.

pub(crate) mod clip;
pub mod table;

use tracing::debug;

use crate::animation::shape::AnimatedShape;
use crate::animation::transitions::clip::ClipPolygonRenderer;
use crate::animation::transitions::table::{TransitionClass, transition_info};
use crate::model::effect::{TransitionFilterInfo, TransitionMode};

/// Renderer built from the capability table when a transition filter starts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FilterRenderer {
    Clip(ClipPolygonRenderer),
    /// Special transitions degrade to a fade; `reveal` fades in.
    Fade { reveal: bool },
}

impl FilterRenderer {
    /// `None` when the pair is not in the table; the filter then does nothing.
    pub(crate) fn for_filter(filter: &TransitionFilterInfo) -> Option<Self> {
        let info = transition_info(filter.kind, filter.subtype);
        match info.class {
            TransitionClass::Invalid => {
                debug!(kind = ?filter.kind, subtype = ?filter.subtype, "unsupported transition");
                None
            }
            TransitionClass::ClipPolygon => {
                Some(Self::Clip(ClipPolygonRenderer::new(filter, info)))
            }
            TransitionClass::Special => Some(Self::Fade {
                reveal: filter.mode == TransitionMode::In,
            }),
        }
    }

    pub(crate) fn apply(&self, shape: &mut AnimatedShape, t: f64) {
        match self {
            Self::Clip(clip) => {
                let path = clip.clip(t, shape.base_bbox());
                shape.state_mut().clip = Some(path);
            }
            Self::Fade { reveal } => shape.set_opacity(if *reveal { t } else { 1.0 - t }),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/animation/transitions/mod.rs"]
mod tests;
