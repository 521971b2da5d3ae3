use std::fmt;

use crate::foundation::color::RgbColor;
use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::model::effect::{EffectSpec, SlideTransition};

/// Opaque backend-assigned key identifying a slide or master page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SlideHash(pub String);

impl SlideHash {
    /// Build a hash from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SlideHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Cache key for a slide: stable hash plus its position in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideIdentity {
    /// Stable slide hash.
    pub hash: SlideHash,
    /// 0-based slide index.
    pub index: usize,
}

/// Slide background as described by the slide metadata.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundInfo {
    /// Solid fill; when present no background bitmap is needed.
    #[serde(default)]
    pub fill_color: Option<RgbColor>,
    /// `true` when the slide overrides its master page background.
    #[serde(default)]
    pub is_custom: bool,
}

/// Axis-aligned rectangle in slide units, as sent by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Bounds {
    /// Convert to a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Inclusive point-in-bounds test.
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Action bound to an interactive region of a slide.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickAction {
    /// Go back one slide.
    PrevPage,
    /// Go forward one slide.
    NextPage,
    /// Jump to the first slide.
    FirstPage,
    /// Jump to the last slide.
    LastPage,
    /// Jump to the slide with this name.
    Bookmark(String),
    /// End the presentation.
    StopPresentation,
}

/// Clickable region declared on a slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interaction {
    /// Region in slide units.
    pub bounds: Bounds,
    /// Action run when the region is clicked.
    pub action: ClickAction,
}

/// Metadata for one slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInfo {
    /// Stable slide hash.
    pub hash: SlideHash,
    /// 0-based position in the deck.
    pub index: usize,
    /// Optional slide name, used for bookmark jumps.
    #[serde(default)]
    pub name: Option<String>,
    /// Master page this slide derives from.
    pub master_page: SlideHash,
    /// `true` when the slide has no draw page content.
    #[serde(default)]
    pub empty: bool,
    /// Hidden slides are skipped during playback.
    #[serde(default)]
    pub hidden: bool,
    /// Whether master page objects are drawn; an absent flag means they are not.
    #[serde(default)]
    pub master_page_objects_visibility: Option<bool>,
    /// Background description; absent means nothing to draw.
    #[serde(default)]
    pub background: Option<BackgroundInfo>,
    /// Transition played when entering the slide.
    #[serde(default)]
    pub transition: Option<SlideTransition>,
    /// Clickable regions, in declaration order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Main-sequence effects, in playback order.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    /// Auto-advance delay in milliseconds once all effects have played.
    #[serde(default)]
    pub next_slide_duration: Option<u64>,
}

impl SlideInfo {
    /// Build minimal metadata for a slide.
    pub fn new(
        hash: impl Into<SlideHash>,
        index: usize,
        master_page: impl Into<SlideHash>,
    ) -> Self {
        Self {
            hash: hash.into(),
            index,
            name: None,
            master_page: master_page.into(),
            empty: false,
            hidden: false,
            master_page_objects_visibility: None,
            background: None,
            transition: None,
            interactions: Vec::new(),
            effects: Vec::new(),
            next_slide_duration: None,
        }
    }

    /// Identity used as the compositor cache key.
    pub fn identity(&self) -> SlideIdentity {
        SlideIdentity {
            hash: self.hash.clone(),
            index: self.index,
        }
    }

    /// Return `true` when master page layers are part of this slide's composition.
    pub fn master_page_objects_visible(&self) -> bool {
        self.master_page_objects_visibility.unwrap_or(false)
    }

    /// Key under which this slide's background bitmap is cached.
    pub fn background_key(&self) -> &SlideHash {
        match &self.background {
            Some(bg) if bg.is_custom => &self.hash,
            _ => &self.master_page,
        }
    }
}

/// Deck-level metadata delivered once per document load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationInfo {
    /// Slide width in slide units.
    pub slide_width: f64,
    /// Slide height in slide units.
    pub slide_height: f64,
    /// Slides in deck order.
    pub slides: Vec<SlideInfo>,
}

impl PresentationInfo {
    /// Parse and validate presentation metadata from JSON.
    pub fn from_json_str(s: &str) -> SlideShowResult<Self> {
        let info: Self = serde_json::from_str(s)?;
        info.validate()?;
        Ok(info)
    }

    /// Check slide dimensions and index/hash consistency.
    pub fn validate(&self) -> SlideShowResult<()> {
        if !(self.slide_width.is_finite() && self.slide_width > 0.0)
            || !(self.slide_height.is_finite() && self.slide_height > 0.0)
        {
            return Err(SlideShowError::validation(format!(
                "slide size must be positive, got {}x{}",
                self.slide_width, self.slide_height
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for (i, slide) in self.slides.iter().enumerate() {
            if slide.index != i {
                return Err(SlideShowError::validation(format!(
                    "slide {} declares index {}, expected {i}",
                    slide.hash, slide.index
                )));
            }
            if !seen.insert(&slide.hash) {
                return Err(SlideShowError::validation(format!(
                    "duplicate slide hash {}",
                    slide.hash
                )));
            }
        }
        Ok(())
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide size in slide units.
    pub fn slide_size(&self) -> Size {
        Size::new(self.slide_width, self.slide_height)
    }

    /// Look up a slide by index.
    pub fn slide(&self, index: usize) -> Option<&SlideInfo> {
        self.slides.get(index)
    }

    /// Look up a slide by hash.
    pub fn slide_by_hash(&self, hash: &SlideHash) -> Option<&SlideInfo> {
        self.slides.iter().find(|s| &s.hash == hash)
    }

    /// Index of the first slide named `name`.
    pub fn find_bookmark(&self, name: &str) -> Option<usize> {
        self.slides
            .iter()
            .position(|s| s.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/presentation.rs"]
mod tests;
