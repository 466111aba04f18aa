use image::{GrayAlphaImage, ImageBuffer, Rgba, RgbaImage};
use tracing::debug;

use crate::color::ColorChoice;
use crate::error::{Result, TintError};

/// Tint a grayscale mask, preserving its transparency.
///
/// Luminance 0 becomes black and luminance 255 becomes `color`, linearly in
/// between. The alpha channel is copied through untouched.
pub fn colorize(source: &GrayAlphaImage, color: ColorChoice) -> Result<RgbaImage> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(TintError::EmptyImage);
    }
    debug!(width, height, %color, "colorizing mask");

    let [r_tint, g_tint, b_tint] = color.channels();

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let p = source.get_pixel(x, y);
        let gray = p[0];
        let alpha = p[1];

        Rgba([
            scale(gray, r_tint),
            scale(gray, g_tint),
            scale(gray, b_tint),
            alpha,
        ])
    }))
}

/// `round(gray / 255 * tint)`. The product over 255 never lands on .5.
fn scale(gray: u8, tint: u8) -> u8 {
    ((u32::from(gray) * u32::from(tint) + 127) / 255) as u8
}
