use std::path::Path;

use image::{GrayAlphaImage, ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::{Result, TintError};

/// Where the tinted mask is saved when no path is given.
pub const DEFAULT_MASK_OUTPUT: &str = "colorized_mask_image.png";
/// Where the composited base is saved when no path is given.
pub const DEFAULT_COMPOSITE_OUTPUT: &str = "masked_base_image.png";

/// Load any supported image as luminance + alpha.
pub fn load_mask(path: &Path) -> Result<GrayAlphaImage> {
    let mask = image::open(path)
        .map_err(|e| TintError::image(path, e))?
        .to_luma_alpha8();
    debug!(path = %path.display(), dimensions = ?mask.dimensions(), "loaded mask");
    Ok(mask)
}

/// Load any supported image as RGBA.
pub fn load_base(path: &Path) -> Result<RgbaImage> {
    let base = image::open(path)
        .map_err(|e| TintError::image(path, e))?
        .to_rgba8();
    debug!(path = %path.display(), dimensions = ?base.dimensions(), "loaded base");
    Ok(base)
}

/// Write an RGBA image as PNG, replacing whatever is at `path`.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| TintError::image(path, e))?;
    info!(path = %path.display(), "saved png");
    Ok(())
}
