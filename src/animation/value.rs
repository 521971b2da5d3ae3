use smallvec::SmallVec;

use crate::foundation::color::{ClockDirection, ColorSpace, RgbColor};
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::foundation::math::lerp;

/// Kind of value a property carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    /// Scalar.
    Number,
    /// Fixed-length tuple of scalars.
    Tuple,
    /// Keyword from a closed set, such as `visible` / `hidden`.
    Enum,
    /// Free-form keyword.
    String,
    /// RGB color.
    Color,
}

impl ValueType {
    /// Discrete values jump instead of interpolating.
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Enum | Self::String)
    }
}

/// Tuple payload; every tuple property in the table has two components.
pub type Tuple = SmallVec<[f64; 2]>;

/// Value read from or written to an animated property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Scalar.
    Number(f64),
    /// Tuple of scalars.
    Tuple(Tuple),
    /// Color.
    Color(RgbColor),
    /// Keyword.
    Str(String),
}

impl PropertyValue {
    /// Parse a wire value for a property of type `ty`.
    pub fn from_json(ty: ValueType, v: &serde_json::Value) -> SlideShowResult<Self> {
        use serde_json::Value;
        let bad = || SlideShowError::animation(format!("value {v} does not fit a {ty:?} property"));
        Ok(match (ty, v) {
            (ValueType::Number, Value::Number(n)) => Self::Number(n.as_f64().ok_or_else(bad)?),
            (ValueType::Tuple, Value::Array(items)) => Self::Tuple(
                items
                    .iter()
                    .map(|i| i.as_f64().ok_or_else(bad))
                    .collect::<SlideShowResult<Tuple>>()?,
            ),
            (ValueType::Color, Value::String(s)) => Self::Color(RgbColor::from_hex(s)?),
            (ValueType::Enum, Value::Bool(b)) => {
                Self::Str(if *b { "visible" } else { "hidden" }.to_owned())
            }
            (ValueType::Enum | ValueType::String, Value::String(s)) => Self::Str(s.clone()),
            _ => return Err(bad()),
        })
    }

    /// Scalar payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Component-wise sum used to resolve `by` values.
    pub fn add(&self, other: &Self) -> SlideShowResult<Self> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(a + b)),
            (Self::Tuple(a), Self::Tuple(b)) => {
                check_len(a, b)?;
                Ok(Self::Tuple(a.iter().zip(b).map(|(x, y)| x + y).collect()))
            }
            (Self::Color(a), Self::Color(b)) => Ok(Self::Color(RgbColor::new(
                a.red + b.red,
                a.green + b.green,
                a.blue + b.blue,
            ))),
            _ => Err(SlideShowError::animation(format!(
                "cannot add {other:?} to {self:?}"
            ))),
        }
    }

    /// Value at eased progress `t` between `self` and `to`.
    ///
    /// Keywords switch to `to` only once `t` reaches 1.
    pub fn interpolate(
        &self,
        to: &Self,
        t: f64,
        space: ColorSpace,
        dir: ClockDirection,
    ) -> SlideShowResult<Self> {
        match (self, to) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(lerp(*a, *b, t))),
            (Self::Tuple(a), Self::Tuple(b)) => {
                check_len(a, b)?;
                Ok(Self::Tuple(
                    a.iter().zip(b).map(|(x, y)| lerp(*x, *y, t)).collect(),
                ))
            }
            (Self::Color(a), Self::Color(b)) => Ok(Self::Color(match space {
                ColorSpace::Rgb => a.interpolate(*b, t),
                ColorSpace::Hsl => a.to_hsl().interpolate(b.to_hsl(), t, dir).to_rgb(),
            })),
            (Self::Str(a), Self::Str(b)) => Ok(Self::Str(if t >= 1.0 { b } else { a }.clone())),
            _ => Err(SlideShowError::animation(format!(
                "cannot interpolate {self:?} towards {to:?}"
            ))),
        }
    }
}

fn check_len(a: &Tuple, b: &Tuple) -> SlideShowResult<()> {
    if a.len() != b.len() {
        return Err(SlideShowError::contract(format!(
            "tuple length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
