//! Wire descriptions of slide transitions and main-sequence effects.

use crate::animation::ease::Ease;
use crate::foundation::color::{ClockDirection, ColorSpace};

/// Transition family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum TransitionType {
    BarWipe,
    BarnDoorWipe,
    BlindsWipe,
    CheckerBoardWipe,
    Dissolve,
    EllipseWipe,
    Fade,
    FanWipe,
    FourBoxWipe,
    IrisWipe,
    PinWheelWipe,
    RandomBarWipe,
    SlideWipe,
    WaterfallWipe,
    /// Anything the capability table does not know.
    #[serde(other)]
    Unsupported,
}

/// Transition variant within a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum TransitionSubType {
    Default,
    LeftToRight,
    TopToBottom,
    Vertical,
    Horizontal,
    Down,
    Across,
    Circle,
    Rectangle,
    Diamond,
    #[serde(rename = "crossfade")]
    CrossFade,
    FadeOverColor,
    CenterTop,
    CornersIn,
    CornersOut,
    OneBlade,
    TwoBladeVertical,
    ThreeBlade,
    FourBlade,
    EightBlade,
    FromLeft,
    FromTop,
    FromRight,
    FromBottom,
    HorizontalLeft,
    HorizontalRight,
    /// Anything the capability table does not know.
    #[serde(other)]
    Unsupported,
}

/// Whether a transition reveals (`In`) or hides (`Out`) its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Reveal the target.
    #[default]
    In,
    /// Hide the target.
    Out,
}

/// What kind of visual transition to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionFilterInfo {
    /// Transition family.
    #[serde(rename = "type")]
    pub kind: TransitionType,
    /// Variant within the family.
    pub subtype: TransitionSubType,
    /// Play the sweep backwards.
    #[serde(default)]
    pub reverse: bool,
    /// Reveal or hide.
    #[serde(default)]
    pub mode: TransitionMode,
}

impl TransitionFilterInfo {
    /// Forward, revealing transition.
    pub fn new(kind: TransitionType, subtype: TransitionSubType) -> Self {
        Self {
            kind,
            subtype,
            reverse: false,
            mode: TransitionMode::In,
        }
    }
}

fn default_transition_ms() -> u64 {
    1000
}

/// Transition played when a slide is entered moving forward.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTransition {
    /// Filter description.
    #[serde(flatten)]
    pub filter: TransitionFilterInfo,
    /// Duration in milliseconds.
    #[serde(default = "default_transition_ms")]
    pub duration_ms: u64,
}

/// When an effect starts relative to its predecessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectTrigger {
    /// Waits for a user advance.
    #[default]
    OnClick,
    /// Starts as soon as the previous effect (or the slide entry) completes.
    AfterPrevious,
}

/// One step of a slide's main sequence: a group of animations started together.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSpec {
    /// Start condition.
    #[serde(default)]
    pub trigger: EffectTrigger,
    /// Animations making up the effect.
    pub animations: Vec<AnimationSpec>,
}

/// A single timed animation of one shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Target shape id.
    pub shape: String,
    /// Delay from the effect start, in milliseconds.
    #[serde(default)]
    pub begin_ms: u64,
    /// Active duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    /// Progress easing.
    #[serde(default)]
    pub ease: Ease,
    /// What is animated.
    #[serde(flatten)]
    pub kind: AnimationKind,
}

/// Animation strategy description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnimationKind {
    /// Interpolate a named attribute using from/to/by values.
    #[serde(rename_all = "camelCase")]
    Property {
        /// Attribute name, e.g. `opacity` or `translate`.
        attribute: String,
        /// Start value; the current value is used when absent.
        #[serde(default)]
        from: Option<serde_json::Value>,
        /// End value.
        #[serde(default)]
        to: Option<serde_json::Value>,
        /// Offset added to the start value when `to` is absent.
        #[serde(default)]
        by: Option<serde_json::Value>,
        /// Color interpolation space.
        #[serde(default)]
        color_space: ColorSpace,
        /// Hue direction for HSL interpolation.
        #[serde(default)]
        direction: ClockDirection,
    },
    /// Assign a value for the whole active duration.
    Set {
        /// Attribute name.
        attribute: String,
        /// Assigned value.
        to: serde_json::Value,
    },
    /// Reveal or hide the shape with a transition filter.
    TransitionFilter {
        /// Filter description.
        transition: TransitionFilterInfo,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/model/effect.rs"]
mod tests;
