//! RGB and HSL color values used by the compositor and the animation engine.
//!
//! Channels are normalized to `[0, 1]`; hue is in degrees `[0, 360)`.

use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::foundation::math::lerp;

/// Color space used when interpolating between two colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Component-wise interpolation of red, green and blue.
    #[default]
    Rgb,
    /// Interpolation of hue around the color wheel, plus saturation and lightness.
    Hsl,
}

/// Direction hue travels around the color wheel during HSL interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockDirection {
    /// Hue decreases, wrapping from 0 to 360 when needed.
    #[default]
    Clockwise,
    /// Hue increases, wrapping from 360 to 0 when needed.
    CounterClockwise,
}

impl ClockDirection {
    /// Direction giving the shorter arc from `from` to `to` (in degrees).
    pub fn shortest(from: f64, to: f64) -> Self {
        let diff = (to - from).rem_euclid(360.0);
        if diff <= 180.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }
}

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
}

impl RgbColor {
    /// Opaque black.
    pub const BLACK: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    /// Build a color, clamping each channel into `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
        }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> SlideShowResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(SlideShowError::validation(format!(
                "hex color must be RRGGBB, got \"{s}\""
            )));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| {
                SlideShowError::validation(format!("invalid hex color \"{s}\""))
            })
        };
        Ok(Self::from_rgb8(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Opaque RGBA8 pixel (opaque, so premultiplied and straight alpha coincide).
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.red), to_u8(self.green), to_u8(self.blue), 255]
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> HslColor {
        let (r, g, b) = (self.red, self.green, self.blue);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;

        if delta.abs() < f64::EPSILON {
            return HslColor::new(0.0, 0.0, lightness);
        }

        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let sector = if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        HslColor::new(sector * 60.0, saturation, lightness)
    }

    /// Component-wise interpolation.
    pub fn interpolate(self, to: RgbColor, t: f64) -> RgbColor {
        RgbColor::new(
            lerp(self.red, to.red, t),
            lerp(self.green, to.green, t),
            lerp(self.blue, to.blue, t),
        )
    }
}

impl TryFrom<String> for RgbColor {
    type Error = SlideShowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(value: RgbColor) -> Self {
        value.to_hex()
    }
}

/// HSL color: hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HslColor {
    /// Hue in `[0, 360)`.
    pub hue: f64,
    /// Saturation.
    pub saturation: f64,
    /// Lightness.
    pub lightness: f64,
}

impl HslColor {
    /// Build a color, wrapping hue into `[0, 360)` and clamping the other channels.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness: lightness.clamp(0.0, 1.0),
        }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> RgbColor {
        if self.saturation == 0.0 {
            let l = self.lightness;
            return RgbColor::new(l, l, l);
        }

        let l = self.lightness;
        let s = self.saturation;
        let v2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let v1 = 2.0 * l - v2;

        RgbColor::new(
            hue_to_channel(v1, v2, self.hue + 120.0),
            hue_to_channel(v1, v2, self.hue),
            hue_to_channel(v1, v2, self.hue - 120.0),
        )
    }

    /// Interpolate towards `to`, moving hue around the wheel in `dir`.
    ///
    /// Hue takes the wrap-around path whenever the linear path would go the other way, so
    /// 350° → 10° counter-clockwise passes through 0°, not 180°.
    pub fn interpolate(self, to: HslColor, t: f64, dir: ClockDirection) -> HslColor {
        let s = 1.0 - t;
        let ccw = dir == ClockDirection::CounterClockwise;

        let hue = if self.hue <= to.hue && !ccw {
            s * (self.hue + 360.0) + t * to.hue
        } else if self.hue > to.hue && ccw {
            s * self.hue + t * (to.hue + 360.0)
        } else {
            s * self.hue + t * to.hue
        };

        HslColor::new(
            hue,
            s * self.saturation + t * to.saturation,
            s * self.lightness + t * to.lightness,
        )
    }
}

fn hue_to_channel(v1: f64, v2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(360.0);
    if hue < 60.0 {
        v1 + (v2 - v1) * hue / 60.0
    } else if hue < 180.0 {
        v2
    } else if hue < 240.0 {
        v1 + (v2 - v1) * (240.0 - hue) / 60.0
    } else {
        v1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
