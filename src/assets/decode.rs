use anyhow::Context;

use crate::assets::bitmap::Bitmap;
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::foundation::math::mul_div255_u8;

/// Decode a PNG (or any format `image` recognizes) into a premultiplied bitmap.
pub fn decode_png(bytes: &[u8]) -> SlideShowResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode layer image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Bitmap::from_premul_rgba8(width, height, data)
}

/// Parse an SVG document and rasterize it to exactly `width`x`height` pixels.
pub fn rasterize_svg(bytes: &[u8], width: u32, height: u32) -> SlideShowResult<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse animated shape svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| {
            SlideShowError::validation(format!("invalid svg raster size {width}x{height}"))
        })?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Bitmap::from_premul_rgba8(width, height, pixmap.take())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
