use crate::foundation::error::{SlideShowError, SlideShowResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Host clock reading in milliseconds.
///
/// All timers in the core (prefetch debounce, animation activities, auto-advance) are driven by
/// the host passing the current `Millis` into `tick`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Clock origin.
    pub const ZERO: Self = Self(0);

    /// Return `self + ms` using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Convert to seconds.
    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }
}

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a validated size with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SlideShowResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlideShowError::validation(format!(
                "pixel size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    /// Return `true` when `self` is at least as large as `other` on both axes.
    pub fn covers(self, other: PixelSize) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
