//! Static table of animatable shape attributes.

use std::collections::HashMap;
use std::sync::LazyLock;

use smallvec::smallvec;

use crate::animation::shape::AnimatedShape;
use crate::animation::value::{PropertyValue, ValueType};
use crate::foundation::color::RgbColor;
use crate::foundation::core::{Size, Vec2};
use crate::foundation::error::{SlideShowError, SlideShowResult};

/// Named scalar conversion applied when reading or writing a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    /// Multiply by the slide width.
    ScaleBySlideWidth,
    /// Multiply by the slide height.
    ScaleBySlideHeight,
    /// Divide by the slide width.
    DivideBySlideWidth,
    /// Divide by the slide height.
    DivideBySlideHeight,
}

impl Modifier {
    /// Apply the conversion to `v`.
    pub fn apply(self, v: f64, slide: Size) -> f64 {
        match self {
            Self::ScaleBySlideWidth => v * slide.width,
            Self::ScaleBySlideHeight => v * slide.height,
            Self::DivideBySlideWidth => v / slide.width,
            Self::DivideBySlideHeight => v / slide.height,
        }
    }
}

type Getter = fn(&AnimatedShape) -> PropertyValue;
type Setter = fn(&mut AnimatedShape, &PropertyValue) -> SlideShowResult<()>;

/// How to read and write one attribute.
#[derive(Clone, Copy, Debug)]
pub struct PropertyDescriptor {
    /// Attribute name as used in effect descriptions.
    pub name: &'static str,
    /// Value type.
    pub value_type: ValueType,
    pub(crate) get: Getter,
    pub(crate) set: Setter,
    /// Conversion applied to values read from the shape.
    pub get_mod: Option<Modifier>,
    /// Conversion applied to values before they are written.
    pub set_mod: Option<Modifier>,
}

impl PropertyDescriptor {
    /// Read the attribute with the read modifier applied.
    pub fn read(&self, shape: &AnimatedShape) -> PropertyValue {
        apply_modifier((self.get)(shape), self.get_mod, shape.slide_size())
    }

    /// Write the attribute after applying the write modifier.
    pub fn write(&self, shape: &mut AnimatedShape, value: &PropertyValue) -> SlideShowResult<()> {
        let value = apply_modifier(value.clone(), self.set_mod, shape.slide_size());
        (self.set)(shape, &value)
    }
}

/// Look up an attribute, case-insensitively.
pub fn property(name: &str) -> Option<&'static PropertyDescriptor> {
    PROPERTIES.get(name.to_ascii_lowercase().as_str())
}

macro_rules! number_property {
    ($name:literal, $get:path, $set:path) => {
        number_property!($name, $get, $set, None, None)
    };
    ($name:literal, $get:path, $set:path, $get_mod:expr, $set_mod:expr) => {
        PropertyDescriptor {
            name: $name,
            value_type: ValueType::Number,
            get: |s| PropertyValue::Number($get(s)),
            set: |s, v| {
                $set(s, number(v)?);
                Ok(())
            },
            get_mod: $get_mod,
            set_mod: $set_mod,
        }
    };
}

macro_rules! keyword_property {
    ($name:literal, $ty:expr, $field:ident) => {
        PropertyDescriptor {
            name: $name,
            value_type: $ty,
            get: |s| PropertyValue::Str(s.state().$field.clone()),
            set: |s, v| {
                s.state_mut().$field = keyword(v)?.to_owned();
                Ok(())
            },
            get_mod: None,
            set_mod: None,
        }
    };
}

macro_rules! color_property {
    ($name:literal, $field:ident) => {
        PropertyDescriptor {
            name: $name,
            value_type: ValueType::Color,
            get: |s| PropertyValue::Color(s.state().$field),
            set: |s, v| {
                s.state_mut().$field = color(v)?;
                Ok(())
            },
            get_mod: None,
            set_mod: None,
        }
    };
}

static PROPERTIES: LazyLock<HashMap<&'static str, PropertyDescriptor>> = LazyLock::new(|| {
    use Modifier::*;

    let entries = [
        number_property!(
            "x",
            AnimatedShape::x,
            AnimatedShape::set_x,
            Some(DivideBySlideWidth),
            Some(ScaleBySlideWidth)
        ),
        number_property!(
            "y",
            AnimatedShape::y,
            AnimatedShape::set_y,
            Some(DivideBySlideHeight),
            Some(ScaleBySlideHeight)
        ),
        number_property!(
            "width",
            AnimatedShape::width,
            AnimatedShape::set_width,
            Some(DivideBySlideWidth),
            Some(ScaleBySlideWidth)
        ),
        number_property!(
            "height",
            AnimatedShape::height,
            AnimatedShape::set_height,
            Some(DivideBySlideHeight),
            Some(ScaleBySlideHeight)
        ),
        number_property!("opacity", AnimatedShape::opacity, AnimatedShape::set_opacity),
        number_property!("rotate", AnimatedShape::rotation, AnimatedShape::set_rotation),
        number_property!("skewx", AnimatedShape::skew_x, AnimatedShape::set_skew_x),
        number_property!("skewy", AnimatedShape::skew_y, AnimatedShape::set_skew_y),
        PropertyDescriptor {
            name: "visibility",
            value_type: ValueType::Enum,
            get: |s| {
                let v = if s.state().visible { "visible" } else { "hidden" };
                PropertyValue::Str(v.to_owned())
            },
            set: |s, v| {
                s.state_mut().visible = keyword(v)? == "visible";
                Ok(())
            },
            get_mod: None,
            set_mod: None,
        },
        keyword_property!("fillstyle", ValueType::String, fill_style),
        keyword_property!("linestyle", ValueType::String, line_style),
        color_property!("fillcolor", fill_color),
        color_property!("linecolor", line_color),
        color_property!("charcolor", char_color),
        color_property!("dimcolor", dim_color),
        PropertyDescriptor {
            name: "scale",
            value_type: ValueType::Tuple,
            get: |s| PropertyValue::Tuple(smallvec![s.width(), s.height()]),
            set: |s, v| {
                let [w, h] = pair(v)?;
                s.set_width(w);
                s.set_height(h);
                Ok(())
            },
            get_mod: None,
            set_mod: None,
        },
        PropertyDescriptor {
            name: "translate",
            value_type: ValueType::Tuple,
            get: |s| {
                let p = s.pos();
                PropertyValue::Tuple(smallvec![p.x, p.y])
            },
            set: |s, v| {
                let [x, y] = pair(v)?;
                s.set_pos(Vec2::new(x, y));
                Ok(())
            },
            get_mod: None,
            set_mod: None,
        },
    ];

    entries.into_iter().map(|d| (d.name, d)).collect()
});

fn apply_modifier(value: PropertyValue, modifier: Option<Modifier>, slide: Size) -> PropertyValue {
    match (value, modifier) {
        (PropertyValue::Number(n), Some(m)) => PropertyValue::Number(m.apply(n, slide)),
        (value, _) => value,
    }
}

fn mismatch(expected: &str, got: &PropertyValue) -> SlideShowError {
    SlideShowError::contract(format!("expected {expected} value, got {got:?}"))
}

fn number(v: &PropertyValue) -> SlideShowResult<f64> {
    v.as_number().ok_or_else(|| mismatch("number", v))
}

fn keyword(v: &PropertyValue) -> SlideShowResult<&str> {
    match v {
        PropertyValue::Str(s) => Ok(s),
        _ => Err(mismatch("keyword", v)),
    }
}

fn color(v: &PropertyValue) -> SlideShowResult<RgbColor> {
    match v {
        PropertyValue::Color(c) => Ok(*c),
        _ => Err(mismatch("color", v)),
    }
}

fn pair(v: &PropertyValue) -> SlideShowResult<[f64; 2]> {
    match v {
        PropertyValue::Tuple(t) if t.len() == 2 => Ok([t[0], t[1]]),
        _ => Err(mismatch("2-tuple", v)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/property.rs"]
mod tests;
