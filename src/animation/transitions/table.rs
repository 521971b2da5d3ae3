//! Capability table: which renderer handles a `(type, subtype)` pair and how it is oriented.

use std::collections::HashMap;
use std::f64::consts::SQRT_2;
use std::sync::LazyLock;

use crate::model::effect::{TransitionSubType, TransitionType};

/// Renderer family for a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionClass {
    /// Not supported; the transition is a no-op.
    Invalid,
    /// Parametric clip polygon swept from 0 to 1.
    ClipPolygon,
    /// Anything else; rendered as an opacity fade.
    Special,
}

/// How a clip sweep is played backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReverseMethod {
    /// Backwards looks the same as forwards.
    Ignore,
    /// Invert the sweep and subtract the polygon from the full area.
    SubtractAndInvert,
    /// Rotate the polygon by 180° around the center.
    Rotate180,
    /// Mirror horizontally.
    FlipX,
    /// Mirror vertically.
    FlipY,
}

/// Static description of one table entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionInfo {
    /// Renderer family.
    pub class: TransitionClass,
    /// Rotation of the unit polygon in degrees, around its center.
    pub rotation: f64,
    /// Horizontal scale of the unit polygon.
    pub scale_x: f64,
    /// Vertical scale of the unit polygon.
    pub scale_y: f64,
    /// Reverse-direction handling.
    pub reverse: ReverseMethod,
    /// In `out` mode invert the sweep rather than the subtraction.
    pub out_inverts_sweep: bool,
    /// Keep the polygon's aspect ratio when fitting it to the shape.
    pub scale_isotropically: bool,
}

impl TransitionInfo {
    const INVALID: Self = Self {
        class: TransitionClass::Invalid,
        rotation: 0.0,
        scale_x: 0.0,
        scale_y: 0.0,
        reverse: ReverseMethod::Ignore,
        out_inverts_sweep: false,
        scale_isotropically: false,
    };

    const fn clip(rotation: f64, reverse: ReverseMethod) -> Self {
        Self {
            class: TransitionClass::ClipPolygon,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
            reverse,
            out_inverts_sweep: true,
            scale_isotropically: false,
        }
    }

    const fn special() -> Self {
        Self {
            class: TransitionClass::Special,
            ..Self::clip(0.0, ReverseMethod::Ignore)
        }
    }

    const fn isotropic(self) -> Self {
        Self {
            scale_isotropically: true,
            ..self
        }
    }

    const fn sweep_not_inverted(self) -> Self {
        Self {
            out_inverts_sweep: false,
            ..self
        }
    }

    const fn scaled(self, s: f64) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..self
        }
    }
}

/// Table entry for `(kind, subtype)`; unknown pairs map to [`TransitionClass::Invalid`].
pub fn transition_info(
    kind: TransitionType,
    subtype: TransitionSubType,
) -> &'static TransitionInfo {
    TABLE
        .get(&(kind, subtype))
        .unwrap_or(&TransitionInfo::INVALID)
}

static TABLE: LazyLock<HashMap<(TransitionType, TransitionSubType), TransitionInfo>> =
    LazyLock::new(|| {
        use ReverseMethod::*;
        use TransitionSubType as S;
        use TransitionType as T;

        let mut m = HashMap::new();
        m.insert((T::BarnDoorWipe, S::Vertical), TransitionInfo::clip(0.0, SubtractAndInvert));
        m.insert((T::BarnDoorWipe, S::Horizontal), TransitionInfo::clip(90.0, SubtractAndInvert));
        m.insert(
            (T::BarWipe, S::LeftToRight),
            TransitionInfo::clip(0.0, FlipX).sweep_not_inverted(),
        );
        m.insert(
            (T::BarWipe, S::TopToBottom),
            TransitionInfo::clip(90.0, FlipY).sweep_not_inverted(),
        );
        m.insert((T::BlindsWipe, S::Horizontal), TransitionInfo::clip(90.0, FlipX));
        m.insert((T::BlindsWipe, S::Vertical), TransitionInfo::clip(0.0, FlipY));
        m.insert((T::CheckerBoardWipe, S::Down), TransitionInfo::clip(90.0, FlipY));
        m.insert((T::CheckerBoardWipe, S::Across), TransitionInfo::clip(0.0, FlipX));
        m.insert((T::Dissolve, S::Default), TransitionInfo::clip(0.0, Ignore).isotropic());
        m.insert(
            (T::EllipseWipe, S::Circle),
            TransitionInfo::clip(0.0, SubtractAndInvert).isotropic(),
        );
        m.insert((T::EllipseWipe, S::Horizontal), TransitionInfo::clip(0.0, SubtractAndInvert));
        m.insert(
            (T::EllipseWipe, S::Vertical),
            TransitionInfo::clip(90.0, SubtractAndInvert).isotropic(),
        );
        m.insert((T::Fade, S::CrossFade), TransitionInfo::special());
        m.insert((T::Fade, S::FadeOverColor), TransitionInfo::special());
        m.insert((T::FanWipe, S::CenterTop), TransitionInfo::clip(0.0, FlipY));
        m.insert((T::FourBoxWipe, S::CornersIn), TransitionInfo::clip(0.0, SubtractAndInvert));
        m.insert((T::FourBoxWipe, S::CornersOut), TransitionInfo::clip(0.0, SubtractAndInvert));
        m.insert((T::IrisWipe, S::Rectangle), TransitionInfo::clip(0.0, SubtractAndInvert));
        m.insert(
            (T::IrisWipe, S::Diamond),
            TransitionInfo::clip(45.0, SubtractAndInvert).scaled(SQRT_2),
        );
        for blades in [
            S::OneBlade,
            S::TwoBladeVertical,
            S::ThreeBlade,
            S::FourBlade,
            S::EightBlade,
        ] {
            m.insert((T::PinWheelWipe, blades), TransitionInfo::clip(0.0, FlipX).isotropic());
        }
        m.insert((T::RandomBarWipe, S::Horizontal), TransitionInfo::clip(90.0, Ignore));
        m.insert((T::RandomBarWipe, S::Vertical), TransitionInfo::clip(0.0, Ignore));
        for from in [S::FromLeft, S::FromTop, S::FromRight, S::FromBottom] {
            m.insert((T::SlideWipe, from), TransitionInfo::special());
        }
        m.insert((T::WaterfallWipe, S::HorizontalLeft), TransitionInfo::clip(-90.0, Rotate180));
        m.insert((T::WaterfallWipe, S::HorizontalRight), TransitionInfo::clip(90.0, Rotate180));
        m
    });

#[cfg(test)]
#[path = "../../../tests/unit/animation/transitions/table.rs"]
mod tests;
