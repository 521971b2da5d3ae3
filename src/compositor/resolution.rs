use crate::foundation::core::{PixelSize, Size};

/// Smallest ladder entry covering `view`, or the largest entry when none does.
pub(crate) fn pick_resolution(ladder: &[PixelSize], view: PixelSize) -> Option<PixelSize> {
    let mut sorted: Vec<PixelSize> = ladder.to_vec();
    sorted.sort_by_key(|r| u64::from(r.width) * u64::from(r.height));
    sorted
        .iter()
        .copied()
        .find(|r| r.covers(view))
        .or_else(|| sorted.last().copied())
}

/// Fit the slide aspect ratio inside `resolution`.
pub(crate) fn fit_canvas(resolution: PixelSize, slide: Size) -> PixelSize {
    let slide_aspect = slide.width / slide.height;
    let res_aspect = f64::from(resolution.width) / f64::from(resolution.height);

    let (w, h) = if !slide_aspect.is_finite() || slide_aspect <= 0.0 {
        (f64::from(resolution.width), f64::from(resolution.height))
    } else if slide_aspect >= res_aspect {
        let w = f64::from(resolution.width);
        (w, w / slide_aspect)
    } else {
        let h = f64::from(resolution.height);
        (h * slide_aspect, h)
    };

    PixelSize {
        width: (w.round() as u32).max(1),
        height: (h.round() as u32).max(1),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/resolution.rs"]
mod tests;
