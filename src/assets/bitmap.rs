use std::sync::Arc;

use crate::foundation::error::{SlideShowError, SlideShowResult};

/// Decoded premultiplied RGBA8 image shared between cache entries with equal checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed premultiplied RGBA8 rows.
    pub data: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied pixels, checking the buffer length.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> SlideShowResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SlideShowError::validation("bitmap size overflow"))?;
        if data.len() != expected {
            return Err(SlideShowError::validation(format!(
                "bitmap {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// Bitmap filled with one premultiplied pixel value.
    pub fn solid(width: u32, height: u32, px: [u8; 4]) -> Self {
        let data = px.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            data: Arc::new(data),
        }
    }

    /// Read one pixel, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
