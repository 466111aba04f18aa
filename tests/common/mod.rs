use std::path::{Path, PathBuf};

use image::{GrayAlphaImage, ImageBuffer, LumaA, Rgba, RgbaImage};

/// Horizontal luminance ramp with a vertical alpha ramp.
pub fn ramp_mask(width: u32, height: u32) -> GrayAlphaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        LumaA([
            (x * 255 / (width - 1).max(1)) as u8,
            (y * 255 / (height - 1).max(1)) as u8,
        ])
    })
}

pub fn checker_base(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([20, 40, 60, 128])
        }
    })
}

pub fn write_mask(dir: &Path, name: &str, mask: &GrayAlphaImage) -> PathBuf {
    let path = dir.join(name);
    mask.save(&path).unwrap();
    path
}

pub fn write_base(dir: &Path, name: &str, base: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    base.save(&path).unwrap();
    path
}
