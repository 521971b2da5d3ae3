use crate::foundation::color::RgbColor;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Size, Vec2};
use crate::model::layer::AnimatedShapeInfo;

/// Id of the pseudo-shape covering the whole slide; slide transitions animate it.
pub const SLIDE_SHAPE_ID: &str = "slide";

/// Scale factors are kept away from zero so the transform stays invertible.
const MIN_SCALE: f64 = 1e-5;

/// Everything an animation can change on a shape. Snapshotted before each effect so a rewind
/// can put it back.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeState {
    /// Current center in slide units.
    pub center: Point,
    /// Horizontal scale relative to the base bounds.
    pub scale_x: f64,
    /// Vertical scale relative to the base bounds.
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal skew factor.
    pub skew_x: f64,
    /// Vertical skew factor.
    pub skew_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Visibility.
    pub visible: bool,
    /// Fill color.
    pub fill_color: RgbColor,
    /// Stroke color.
    pub line_color: RgbColor,
    /// Text color.
    pub char_color: RgbColor,
    /// Color used when the shape is dimmed after its effect.
    pub dim_color: RgbColor,
    /// Fill style keyword.
    pub fill_style: String,
    /// Line style keyword.
    pub line_style: String,
    /// Transition clip in base-bounds coordinates; `None` shows the whole shape.
    pub clip: Option<BezPath>,
}

/// A shape the engine animates. Layout lives in `base`; everything animated lives in `state`.
#[derive(Clone, Debug)]
pub struct AnimatedShape {
    id: String,
    base: Rect,
    slide: Size,
    state: ShapeState,
    running: u32,
}

impl AnimatedShape {
    /// Shape with bounds `base` on a slide of size `slide`.
    pub fn new(id: impl Into<String>, base: Rect, slide: Size, visible: bool) -> Self {
        Self {
            id: id.into(),
            base,
            slide,
            state: ShapeState {
                center: base.center(),
                scale_x: 1.0,
                scale_y: 1.0,
                rotation: 0.0,
                skew_x: 0.0,
                skew_y: 0.0,
                opacity: 1.0,
                visible,
                fill_color: RgbColor::BLACK,
                line_color: RgbColor::BLACK,
                char_color: RgbColor::BLACK,
                dim_color: RgbColor::BLACK,
                fill_style: "solid".to_owned(),
                line_style: "solid".to_owned(),
                clip: None,
            },
            running: 0,
        }
    }

    /// Shape for a compositor layer descriptor.
    pub fn from_info(info: &AnimatedShapeInfo, slide: Size) -> Self {
        Self::new(
            info.hash.clone(),
            info.bounds.to_rect(),
            slide,
            info.init_visible,
        )
    }

    /// Pseudo-shape spanning the slide.
    pub fn slide(slide: Size) -> Self {
        Self::new(SLIDE_SHAPE_ID, slide.to_rect(), slide, true)
    }

    /// Shape id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Bounds before any animation.
    pub fn base_bbox(&self) -> Rect {
        self.base
    }

    /// Size of the slide the shape lives on.
    pub fn slide_size(&self) -> Size {
        self.slide
    }

    /// Current animated state.
    pub fn state(&self) -> &ShapeState {
        &self.state
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ShapeState {
        self.state.clone()
    }

    /// Put back a state taken with [`Self::snapshot`].
    pub fn restore(&mut self, state: ShapeState) {
        self.state = state;
    }

    /// Return `true` while at least one animation has started and not ended on this shape.
    pub fn is_animating(&self) -> bool {
        self.running > 0
    }

    pub(crate) fn notify_animation_start(&mut self) {
        self.running += 1;
    }

    pub(crate) fn notify_animation_end(&mut self) {
        self.running = self.running.saturating_sub(1);
    }

    /// Map from base-bounds coordinates to slide coordinates.
    pub fn transform(&self) -> Affine {
        let s = &self.state;
        Affine::translate(s.center.to_vec2())
            * Affine::rotate(s.rotation.to_radians())
            * Affine::scale_non_uniform(s.scale_x, s.scale_y)
            * Affine::skew(s.skew_x, s.skew_y)
            * Affine::translate(-self.base.center().to_vec2())
    }

    pub(crate) fn x(&self) -> f64 {
        self.state.center.x
    }

    pub(crate) fn y(&self) -> f64 {
        self.state.center.y
    }

    pub(crate) fn set_x(&mut self, x: f64) {
        self.state.center.x = x;
    }

    pub(crate) fn set_y(&mut self, y: f64) {
        self.state.center.y = y;
    }

    pub(crate) fn pos(&self) -> Vec2 {
        self.state.center.to_vec2()
    }

    pub(crate) fn set_pos(&mut self, pos: Vec2) {
        self.state.center = pos.to_point();
    }

    pub(crate) fn width(&self) -> f64 {
        self.state.scale_x * self.base.width()
    }

    pub(crate) fn height(&self) -> f64 {
        self.state.scale_y * self.base.height()
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.state.scale_x = scale_factor(width, self.base.width());
    }

    pub(crate) fn set_height(&mut self, height: f64) {
        self.state.scale_y = scale_factor(height, self.base.height());
    }

    pub(crate) fn opacity(&self) -> f64 {
        self.state.opacity
    }

    pub(crate) fn rotation(&self) -> f64 {
        self.state.rotation
    }

    pub(crate) fn set_rotation(&mut self, degrees: f64) {
        self.state.rotation = degrees;
    }

    pub(crate) fn skew_x(&self) -> f64 {
        self.state.skew_x
    }

    pub(crate) fn set_skew_x(&mut self, skew: f64) {
        self.state.skew_x = skew;
    }

    pub(crate) fn skew_y(&self) -> f64 {
        self.state.skew_y
    }

    pub(crate) fn set_skew_y(&mut self, skew: f64) {
        self.state.skew_y = skew;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f64) {
        self.state.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(crate) fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }
}

fn scale_factor(size: f64, base: f64) -> f64 {
    let f = if base == 0.0 { 1.0 } else { size / base };
    if f.abs() < MIN_SCALE {
        MIN_SCALE.copysign(f)
    } else {
        f
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/shape.rs"]
mod tests;
