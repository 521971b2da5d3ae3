use std::collections::HashMap;

use crate::assets::bitmap::Bitmap;
use crate::model::layer::{LayerEntry, LayerGroup, TextFieldType};
use crate::model::presentation::SlideHash;
use crate::render::surface::SlideImage;

/// Per-page ordered layer list with an expected-next-index check on append.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LayerList {
    entries: Vec<LayerEntry>,
}

impl LayerList {
    pub(crate) fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Whether an append landed where the sender said it would.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AppendOutcome {
    InOrder,
    OutOfOrder { expected: usize, got: usize },
}

/// Everything the compositor has received or produced, keyed for reuse across slides.
#[derive(Debug, Default)]
pub(crate) struct LayerCache {
    /// Decoded images by checksum; shared by backgrounds, layers and text fields.
    images: HashMap<String, Bitmap>,
    /// Page key (slide or master page) to background checksum.
    background_checksums: HashMap<SlideHash, String>,
    master_pages: HashMap<SlideHash, LayerList>,
    draw_pages: HashMap<SlideHash, LayerList>,
    text_fields: HashMap<SlideHash, HashMap<TextFieldType, String>>,
    slides: HashMap<SlideHash, SlideImage>,
}

impl LayerCache {
    pub(crate) fn insert_image(&mut self, checksum: &str, bitmap: Bitmap) {
        self.images.insert(checksum.to_owned(), bitmap);
    }

    pub(crate) fn image(&self, checksum: &str) -> Option<&Bitmap> {
        self.images.get(checksum)
    }

    pub(crate) fn has_image(&self, checksum: &str) -> bool {
        self.images.contains_key(checksum)
    }

    pub(crate) fn set_background(&mut self, page: SlideHash, checksum: String) {
        self.background_checksums.insert(page, checksum);
    }

    pub(crate) fn background_checksum(&self, page: &SlideHash) -> Option<&str> {
        self.background_checksums.get(page).map(String::as_str)
    }

    pub(crate) fn set_text_field(
        &mut self,
        slide: SlideHash,
        field: TextFieldType,
        checksum: String,
    ) {
        self.text_fields.entry(slide).or_default().insert(field, checksum);
    }

    pub(crate) fn text_field(&self, slide: &SlideHash, field: TextFieldType) -> Option<&str> {
        self.text_fields
            .get(slide)
            .and_then(|m| m.get(&field))
            .map(String::as_str)
    }

    pub(crate) fn layers(&self, group: LayerGroup, page: &SlideHash) -> Option<&LayerList> {
        match group {
            LayerGroup::MasterPage => self.master_pages.get(page),
            LayerGroup::DrawPage => self.draw_pages.get(page),
            LayerGroup::Background | LayerGroup::TextFields => None,
        }
    }

    /// Mark a page's layer list as present even if no layer follows.
    pub(crate) fn touch_layers(&mut self, group: LayerGroup, page: SlideHash) {
        if let Some(map) = self.list_map_mut(group) {
            map.entry(page).or_default();
        }
    }

    /// Append a layer. Index 0 restarts the list; any other index is checked against the list
    /// length and appended regardless.
    pub(crate) fn append_layer(
        &mut self,
        group: LayerGroup,
        page: SlideHash,
        index: Option<usize>,
        entry: LayerEntry,
    ) -> AppendOutcome {
        let Some(map) = self.list_map_mut(group) else {
            return AppendOutcome::InOrder;
        };
        if index == Some(0) {
            map.insert(page.clone(), LayerList::default());
        }
        let list = map.entry(page).or_default();
        let expected = list.entries.len();
        list.entries.push(entry);
        match index {
            Some(got) if got != expected => AppendOutcome::OutOfOrder { expected, got },
            _ => AppendOutcome::InOrder,
        }
    }

    fn list_map_mut(&mut self, group: LayerGroup) -> Option<&mut HashMap<SlideHash, LayerList>> {
        match group {
            LayerGroup::MasterPage => Some(&mut self.master_pages),
            LayerGroup::DrawPage => Some(&mut self.draw_pages),
            LayerGroup::Background | LayerGroup::TextFields => None,
        }
    }

    pub(crate) fn slide_image(&self, slide: &SlideHash) -> Option<&SlideImage> {
        self.slides.get(slide)
    }

    /// Cached image for `slide` that had every stage when it was composited.
    pub(crate) fn complete_slide_image(&self, slide: &SlideHash) -> Option<&SlideImage> {
        self.slides.get(slide).filter(|image| image.complete)
    }

    pub(crate) fn insert_slide_image(&mut self, image: SlideImage) {
        self.slides.insert(image.identity.hash.clone(), image);
    }

    pub(crate) fn slide_image_count(&self) -> usize {
        self.slides.len()
    }

    /// Drop everything, e.g. on document reload.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/cache.rs"]
mod tests;
