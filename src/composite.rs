use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Result, TintError};

/// Blend `overlay` onto `base`, weighted by the overlay's alpha.
///
/// Alpha 0 keeps the base color, alpha 255 takes the overlay color. The
/// overlay's alpha is only a blend weight: the output alpha is always the
/// base alpha. Images must have identical dimensions.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> Result<RgbaImage> {
    if base.dimensions() != overlay.dimensions() {
        return Err(TintError::ShapeMismatch {
            base: base.dimensions(),
            overlay: overlay.dimensions(),
        });
    }
    let (width, height) = base.dimensions();
    if width == 0 || height == 0 {
        return Err(TintError::EmptyImage);
    }
    debug!(width, height, "compositing tinted mask onto base");

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let b = base.get_pixel(x, y);
        let o = overlay.get_pixel(x, y);
        let weight = o[3];

        Rgba([
            blend(b[0], o[0], weight),
            blend(b[1], o[1], weight),
            blend(b[2], o[2], weight),
            b[3],
        ])
    }))
}

/// `round((1 - a) * base + a * over)` with `a = weight / 255`.
fn blend(base: u8, over: u8, weight: u8) -> u8 {
    let w = u32::from(weight);
    ((u32::from(base) * (255 - w) + u32::from(over) * w + 127) / 255) as u8
}
