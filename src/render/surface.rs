use std::sync::Arc;

use crate::assets::bitmap::Bitmap;
use crate::foundation::color::RgbColor;
use crate::foundation::core::PixelSize;
use crate::model::presentation::SlideIdentity;
use crate::render::composite::blit_over;

/// Finished, immutable composited slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideImage {
    /// Slide this image was composited for.
    pub identity: SlideIdentity,
    /// Premultiplied RGBA8 pixels at canvas size.
    pub bitmap: Bitmap,
    /// `false` when a stage was drawn without its layers; the slide is recomposed on the next
    /// request.
    pub complete: bool,
}

/// Offscreen RGBA8 drawing surface owned by the compositor.
///
/// Pixels leave the surface only through [`Surface::snapshot`], which copies them into an
/// immutable [`Bitmap`].
#[derive(Debug)]
pub(crate) struct Surface {
    size: PixelSize,
    data: Vec<u8>,
}

impl Surface {
    pub(crate) fn new(size: PixelSize) -> Self {
        Self {
            size,
            data: vec![0; size.rgba_len()],
        }
    }

    pub(crate) fn size(&self) -> PixelSize {
        self.size
    }

    /// Reallocate when the canvas size changed; contents are cleared either way.
    pub(crate) fn resize(&mut self, size: PixelSize) {
        if self.size != size {
            self.size = size;
            self.data = vec![0; size.rgba_len()];
        } else {
            self.clear();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.data.fill(0);
    }

    pub(crate) fn fill(&mut self, color: RgbColor) {
        let px = color.to_rgba8();
        for dp in self.data.chunks_exact_mut(4) {
            dp.copy_from_slice(&px);
        }
    }

    pub(crate) fn draw_bitmap(&mut self, bitmap: &Bitmap) {
        blit_over(
            &mut self.data,
            self.size.width,
            self.size.height,
            &bitmap.data,
            bitmap.width,
            bitmap.height,
            1.0,
        );
    }

    pub(crate) fn snapshot(&self) -> Bitmap {
        Bitmap {
            width: self.size.width,
            height: self.size.height,
            data: Arc::new(self.data.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
