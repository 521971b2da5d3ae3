//! Parametric clip polygons for wipe-style transitions.
//!
//! Every polygon is defined on the unit square for a sweep parameter `t` in `[0, 1]`, where
//! `t = 0` reveals nothing and `t = 1` reveals the whole square. Orientation, direction and
//! mode are applied on top by [`ClipPolygonRenderer`].

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use kurbo::{Circle, Shape};

use crate::animation::transitions::table::{ReverseMethod, TransitionInfo};
use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::foundation::math::seeded_permutation;
use crate::model::effect::{TransitionFilterInfo, TransitionMode, TransitionSubType, TransitionType};

const ACCURACY: f64 = 1e-3;
const BLINDS: usize = 6;
const CHECKER_ROWS: usize = 8;
const DISSOLVE_CELLS: usize = 16;
const RANDOM_BARS: usize = 128;
const FAN_STEPS: usize = 32;
const WATERFALL_SLOPE: f64 = 0.5;
const DISSOLVE_SEED: u64 = 0x5EED_D155;
const RANDOM_BAR_SEED: u64 = 0x5EED_BA55;

/// Return `true` when `p` lies inside `clip` under the even-odd rule.
pub fn clip_contains(clip: &BezPath, p: Point) -> bool {
    clip.winding(p) % 2 != 0
}

/// Clip renderer for one transition filter, oriented once at construction.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ClipPolygonRenderer {
    kind: TransitionType,
    subtype: TransitionSubType,
    transform: Affine,
    forward_sweep: bool,
    subtract: bool,
    isotropic: bool,
}

impl ClipPolygonRenderer {
    pub(crate) fn new(filter: &TransitionFilterInfo, info: &TransitionInfo) -> Self {
        let mut transform = around_center(
            Affine::rotate(info.rotation.to_radians())
                * Affine::scale_non_uniform(info.scale_x, info.scale_y),
        );
        let mut forward_sweep = true;
        let mut subtract = false;

        if filter.reverse {
            match info.reverse {
                ReverseMethod::Ignore => {}
                ReverseMethod::SubtractAndInvert => {
                    forward_sweep = !forward_sweep;
                    subtract = !subtract;
                }
                ReverseMethod::Rotate180 => {
                    transform = around_center(Affine::rotate(PI)) * transform
                }
                ReverseMethod::FlipX => {
                    transform = around_center(Affine::scale_non_uniform(-1.0, 1.0)) * transform
                }
                ReverseMethod::FlipY => {
                    transform = around_center(Affine::scale_non_uniform(1.0, -1.0)) * transform
                }
            }
        }

        if filter.mode == TransitionMode::Out {
            if info.out_inverts_sweep {
                forward_sweep = !forward_sweep;
            } else {
                subtract = !subtract;
            }
        }

        Self {
            kind: filter.kind,
            subtype: filter.subtype,
            transform,
            forward_sweep,
            subtract,
            isotropic: info.scale_isotropically,
        }
    }

    /// Clip path for progress `t`, in the coordinates of `bounds`.
    pub(crate) fn clip(&self, t: f64, bounds: Rect) -> BezPath {
        let t = t.clamp(0.0, 1.0);
        let t = if self.forward_sweep { t } else { 1.0 - t };

        let mut path = self.transform * unit_polygon(self.kind, self.subtype, t);
        if self.subtract {
            let mut inverted = BezPath::new();
            inverted.extend(Rect::new(0.0, 0.0, 1.0, 1.0).path_elements(ACCURACY));
            inverted.extend(path.elements().iter().copied());
            path = inverted;
        }
        fit_to_bounds(bounds, self.isotropic) * path
    }
}

fn around_center(m: Affine) -> Affine {
    let c = Vec2::new(0.5, 0.5);
    Affine::translate(c) * m * Affine::translate(-c)
}

fn fit_to_bounds(bounds: Rect, isotropic: bool) -> Affine {
    if isotropic {
        let side = bounds.width().max(bounds.height());
        let origin = bounds.center() - Vec2::new(side / 2.0, side / 2.0);
        Affine::translate(origin.to_vec2()) * Affine::scale(side)
    } else {
        Affine::translate(bounds.origin().to_vec2())
            * Affine::scale_non_uniform(bounds.width(), bounds.height())
    }
}

/// Unit-square polygon for `(kind, subtype)` at sweep `t`.
pub(crate) fn unit_polygon(kind: TransitionType, subtype: TransitionSubType, t: f64) -> BezPath {
    let mut path = BezPath::new();
    match kind {
        TransitionType::BarWipe => push_rect(&mut path, Rect::new(0.0, 0.0, t, 1.0)),
        TransitionType::BarnDoorWipe => {
            push_rect(&mut path, Rect::new(0.5 - t / 2.0, 0.0, 0.5 + t / 2.0, 1.0))
        }
        TransitionType::BlindsWipe => {
            let w = 1.0 / BLINDS as f64;
            for i in 0..BLINDS {
                let x = i as f64 * w;
                push_rect(&mut path, Rect::new(x, 0.0, x + t * w, 1.0));
            }
        }
        TransitionType::CheckerBoardWipe => {
            let cell = 1.0 / CHECKER_ROWS as f64;
            for row in 0..CHECKER_ROWS {
                let offset = if row % 2 == 1 { cell } else { 0.0 };
                let y = row as f64 * cell;
                for col in -1..(CHECKER_ROWS as i32 / 2) {
                    let x0 = offset + f64::from(col) * 2.0 * cell;
                    let x1 = x0 + t * 2.0 * cell;
                    if x1 > 0.0 {
                        push_rect(&mut path, Rect::new(x0, y, x1, y + cell));
                    }
                }
            }
        }
        TransitionType::Dissolve => {
            let n = DISSOLVE_CELLS;
            let cell = 1.0 / n as f64;
            let shown = revealed(n * n, t);
            for idx in seeded_permutation(n * n, DISSOLVE_SEED).into_iter().take(shown) {
                let (x, y) = ((idx % n) as f64 * cell, (idx / n) as f64 * cell);
                push_rect(&mut path, Rect::new(x, y, x + cell, y + cell));
            }
        }
        TransitionType::EllipseWipe => {
            path.extend(Circle::new((0.5, 0.5), t * SQRT_2 / 2.0).path_elements(ACCURACY));
        }
        TransitionType::FanWipe => {
            let half = t * FRAC_PI_2;
            push_wedge(&mut path, Point::new(0.5, 0.0), 1.2, FRAC_PI_2 - half, 2.0 * half);
        }
        TransitionType::FourBoxWipe => {
            let s = t / 2.0;
            let boxes = if subtype == TransitionSubType::CornersOut {
                [
                    Rect::new(0.5 - s, 0.5 - s, 0.5, 0.5),
                    Rect::new(0.5, 0.5 - s, 0.5 + s, 0.5),
                    Rect::new(0.5 - s, 0.5, 0.5, 0.5 + s),
                    Rect::new(0.5, 0.5, 0.5 + s, 0.5 + s),
                ]
            } else {
                [
                    Rect::new(0.0, 0.0, s, s),
                    Rect::new(1.0 - s, 0.0, 1.0, s),
                    Rect::new(0.0, 1.0 - s, s, 1.0),
                    Rect::new(1.0 - s, 1.0 - s, 1.0, 1.0),
                ]
            };
            for r in boxes {
                push_rect(&mut path, r);
            }
        }
        TransitionType::IrisWipe => {
            let h = t / 2.0;
            push_rect(&mut path, Rect::new(0.5 - h, 0.5 - h, 0.5 + h, 0.5 + h));
        }
        TransitionType::PinWheelWipe => {
            let blades = match subtype {
                TransitionSubType::TwoBladeVertical => 2,
                TransitionSubType::ThreeBlade => 3,
                TransitionSubType::FourBlade => 4,
                TransitionSubType::EightBlade => 8,
                _ => 1,
            };
            let span = TAU / f64::from(blades);
            for k in 0..blades {
                let start = f64::from(k) * span - FRAC_PI_2;
                push_wedge(&mut path, Point::new(0.5, 0.5), 0.75, start, t * span);
            }
        }
        TransitionType::RandomBarWipe => {
            let w = 1.0 / RANDOM_BARS as f64;
            let shown = revealed(RANDOM_BARS, t);
            for i in seeded_permutation(RANDOM_BARS, RANDOM_BAR_SEED).into_iter().take(shown) {
                let x = i as f64 * w;
                push_rect(&mut path, Rect::new(x, 0.0, x + w, 1.0));
            }
        }
        TransitionType::WaterfallWipe => {
            let left = t * (1.0 + WATERFALL_SLOPE);
            let right = (left - WATERFALL_SLOPE).max(0.0);
            if left > 0.0 {
                push_polygon(
                    &mut path,
                    [
                        Point::new(0.0, 0.0),
                        Point::new(1.0, 0.0),
                        Point::new(1.0, right),
                        Point::new(0.0, left),
                    ],
                );
            }
        }
        TransitionType::Fade | TransitionType::SlideWipe | TransitionType::Unsupported => {
            push_rect(&mut path, Rect::new(0.0, 0.0, 1.0, 1.0))
        }
    }
    path
}

fn revealed(total: usize, t: f64) -> usize {
    ((total as f64) * t).floor().clamp(0.0, total as f64) as usize
}

fn push_rect(path: &mut BezPath, r: Rect) {
    path.extend(r.path_elements(ACCURACY));
}

fn push_polygon(path: &mut BezPath, pts: impl IntoIterator<Item = Point>) {
    let mut pts = pts.into_iter();
    let Some(first) = pts.next() else {
        return;
    };
    path.move_to(first);
    for p in pts {
        path.line_to(p);
    }
    path.close_path();
}

/// Circular wedge from angle `start` sweeping `sweep` radians (y axis pointing down).
fn push_wedge(path: &mut BezPath, center: Point, radius: f64, start: f64, sweep: f64) {
    if sweep <= 0.0 {
        return;
    }
    let arc = (0..=FAN_STEPS).map(|i| {
        let a = start + sweep * i as f64 / FAN_STEPS as f64;
        center + Vec2::from_angle(a) * radius
    });
    push_polygon(path, std::iter::once(center).chain(arc));
}

#[cfg(test)]
#[path = "../../../tests/unit/animation/transitions/clip.rs"]
mod tests;
