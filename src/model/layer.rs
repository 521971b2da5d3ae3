use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::model::presentation::{Bounds, SlideHash};

/// Classification of the content inside a slide.
///
/// Layers are drawn Background, then MasterPage, then DrawPage. TextFields are never drawn on
/// their own; they substitute MasterPage placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayerGroup {
    /// Slide or master page background bitmap.
    Background,
    /// Master page objects shared by every slide using that master.
    MasterPage,
    /// Slide's own objects.
    DrawPage,
    /// Per-slide text field renderings.
    TextFields,
}

/// Encoding of an image payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// PNG, decoded into a premultiplied bitmap.
    Png,
    /// Compressed raw pixels; accepted but not drawable.
    Zstd,
}

/// Reference to an image payload delivered out-of-band.
///
/// Two records with equal checksum are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageInfo {
    /// Payload encoding.
    #[serde(rename = "type")]
    pub kind: ImageKind,
    /// Content checksum used for de-duplication.
    pub checksum: String,
}

/// Text field kinds substituted into master page placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TextFieldType {
    /// Slide number field.
    SlideNumber,
    /// Footer text.
    Footer,
    /// Date and time field.
    DateTime,
}

/// Text field rendering for one slide.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextFieldInfo {
    /// Field kind.
    #[serde(rename = "type")]
    pub field: TextFieldType,
    /// Rendered field image.
    pub content: ImageInfo,
}

/// Master page slot filled by a per-slide text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceholderInfo {
    /// Field kind expected in this slot.
    #[serde(rename = "type")]
    pub field: TextFieldType,
}

/// Backing content of an animated shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeContentKind {
    /// Raster image.
    Bitmap,
    /// Vector image rasterized on arrival.
    Svg,
}

/// Descriptor of a shape the animation engine may move, fade or clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedShapeInfo {
    /// Shape id referenced by effects.
    pub hash: String,
    /// Drawn into the static slide image when `true`.
    pub init_visible: bool,
    /// Backing content kind.
    #[serde(rename = "type")]
    pub kind: ShapeContentKind,
    /// Shape bounds in slide units.
    #[serde(default)]
    pub bounds: Bounds,
    /// Checksum of the backing image.
    #[serde(default)]
    pub checksum: Option<String>,
}

impl AnimatedShapeInfo {
    /// Key of the shape's backing image in the image cache.
    pub fn image_key(&self) -> &str {
        self.checksum.as_deref().unwrap_or(&self.hash)
    }
}

/// Payload kind of a layer message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Plain bitmap.
    Bitmap,
    /// Text field slot on a master page.
    Placeholder,
    /// Animated shape.
    Animated,
    /// Text field rendering.
    TextField,
    /// Marks a group as present but without layers.
    Empty,
}

/// Decoded payload of a layer message.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerContent {
    /// Plain bitmap.
    Bitmap(ImageInfo),
    /// Text field slot.
    Placeholder(PlaceholderInfo),
    /// Animated shape.
    Animated(AnimatedShapeInfo),
    /// Text field rendering.
    TextField(TextFieldInfo),
    /// Empty group marker.
    Empty,
}

/// Inbound "slide layer" message.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMessage {
    /// Slide the layer belongs to.
    pub slide_hash: SlideHash,
    /// Layer group.
    pub group: LayerGroup,
    /// Position within the group's layer list.
    #[serde(default)]
    pub index: Option<usize>,
    /// Payload discriminator.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Raw payload, interpreted according to `kind`.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl LayerMessage {
    /// Interpret the raw payload according to the message kind.
    pub fn decode_content(&self) -> SlideShowResult<LayerContent> {
        fn parse<T: serde::de::DeserializeOwned>(
            v: &serde_json::Value,
            what: &str,
        ) -> SlideShowResult<T> {
            serde_json::from_value(v.clone())
                .map_err(|e| SlideShowError::protocol(format!("invalid {what} layer: {e}")))
        }

        Ok(match self.kind {
            LayerKind::Bitmap => LayerContent::Bitmap(parse(&self.content, "bitmap")?),
            LayerKind::Placeholder => {
                LayerContent::Placeholder(parse(&self.content, "placeholder")?)
            }
            LayerKind::Animated => LayerContent::Animated(parse(&self.content, "animated")?),
            LayerKind::TextField => LayerContent::TextField(parse(&self.content, "text field")?),
            LayerKind::Empty => LayerContent::Empty,
        })
    }
}

/// A layer as stored in a per-page layer list. Never mutated after receipt.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerEntry {
    /// Bitmap resolved through the image cache.
    Bitmap(ImageInfo),
    /// Placeholder resolved through the slide's text fields.
    Placeholder {
        /// Field kind.
        field: TextFieldType,
    },
    /// Animated shape; drawn statically only when initially visible.
    Animated(AnimatedShapeInfo),
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
