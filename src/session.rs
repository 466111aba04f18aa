//! Interactive state: the loaded inputs, the current color and the latest
//! outputs.
//!
//! Every change bumps a generation counter. A [`Snapshot`] carries the
//! generation it was taken at, so a render finished after a newer change is
//! refused by [`Session::accept`] and the most recent request always wins.

use std::path::Path;
use std::sync::Arc;

use image::{GrayAlphaImage, RgbaImage};
use tracing::{debug, warn};

use crate::color::ColorChoice;
use crate::colorize::colorize;
use crate::composite::composite;
use crate::error::{Result, TintError};
use crate::image_io;

#[derive(Debug, Default)]
pub struct Session {
    mask: Option<Arc<GrayAlphaImage>>,
    base: Option<Arc<RgbaImage>>,
    color: ColorChoice,
    tinted: Option<RgbaImage>,
    composited: Option<RgbaImage>,
    generation: u64,
}

/// Immutable copy of the inputs at one generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    mask: Arc<GrayAlphaImage>,
    base: Option<Arc<RgbaImage>>,
    color: ColorChoice,
}

/// Outputs computed from a [`Snapshot`].
///
/// The composite is kept as its own result: a base that does not fit the
/// mask fails the composite but still leaves a usable tinted mask.
#[derive(Debug)]
pub struct Render {
    generation: u64,
    pub tinted: RgbaImage,
    pub composited: Option<Result<RgbaImage>>,
}

impl Render {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Remove and return the composite failure, if any.
    pub fn take_composite_error(&mut self) -> Option<TintError> {
        match self.composited.take() {
            Some(Err(e)) => Some(e),
            other => {
                self.composited = other;
                None
            }
        }
    }
}

impl Snapshot {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn color(&self) -> ColorChoice {
        self.color
    }

    /// Run colorize, then composite when a base image is present.
    pub fn render(&self) -> Result<Render> {
        let tinted = colorize(&self.mask, self.color)?;
        let composited = self.base.as_ref().map(|base| composite(base, &tinted));
        Ok(Render {
            generation: self.generation,
            tinted,
            composited,
        })
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> ColorChoice {
        self.color
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mask(&self) -> Option<&GrayAlphaImage> {
        self.mask.as_deref()
    }

    pub fn base(&self) -> Option<&RgbaImage> {
        self.base.as_deref()
    }

    pub fn tinted(&self) -> Option<&RgbaImage> {
        self.tinted.as_ref()
    }

    pub fn composited(&self) -> Option<&RgbaImage> {
        self.composited.as_ref()
    }

    /// A composite needs both a mask and a base.
    pub fn can_apply(&self) -> bool {
        self.mask.is_some() && self.base.is_some()
    }

    pub fn set_mask(&mut self, mask: GrayAlphaImage) {
        self.mask = Some(Arc::new(mask));
        self.invalidate();
    }

    pub fn set_base(&mut self, base: RgbaImage) {
        self.base = Some(Arc::new(base));
        self.invalidate();
    }

    pub fn load_mask(&mut self, path: &Path) -> Result<()> {
        let mask = image_io::load_mask(path)?;
        self.set_mask(mask);
        Ok(())
    }

    pub fn load_base(&mut self, path: &Path) -> Result<()> {
        let base = image_io::load_base(path)?;
        self.set_base(base);
        Ok(())
    }

    pub fn set_color(&mut self, color: ColorChoice) {
        self.color = color;
        self.bump();
    }

    /// Change a single channel. An out-of-range value leaves the color untouched.
    pub fn set_channel(&mut self, channel: &str, value: i64) -> Result<()> {
        self.color.set_channel(channel, value)?;
        self.bump();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let mask = self.mask.clone().ok_or(TintError::MissingInput("mask"))?;
        Ok(Snapshot {
            generation: self.generation,
            mask,
            base: self.base.clone(),
            color: self.color,
        })
    }

    /// Store `render` unless the inputs changed since its snapshot was taken.
    /// A failed composite leaves the composite slot empty.
    pub fn accept(&mut self, render: Render) -> bool {
        if render.generation != self.generation {
            warn!(
                render = render.generation,
                current = self.generation,
                "discarding stale render"
            );
            return false;
        }
        self.tinted = Some(render.tinted);
        self.composited = render.composited.and_then(|c| c.ok());
        true
    }

    /// Recompute all outputs on the calling thread.
    ///
    /// The tinted mask is stored even when the composite fails; the
    /// composite error is returned afterwards.
    pub fn recompute(&mut self) -> Result<()> {
        let mut render = self.snapshot()?.render()?;
        let composite_error = render.take_composite_error();
        self.accept(render);
        match composite_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn save_tinted(&self, path: &Path) -> Result<()> {
        let tinted = self.tinted.as_ref().ok_or(TintError::MissingInput("tinted mask"))?;
        image_io::save_png(tinted, path)
    }

    pub fn save_composited(&self, path: &Path) -> Result<()> {
        let composited = self
            .composited
            .as_ref()
            .ok_or(TintError::MissingInput("composited image"))?;
        image_io::save_png(composited, path)
    }

    fn invalidate(&mut self) {
        self.tinted = None;
        self.composited = None;
        self.bump();
    }

    fn bump(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, color = %self.color, "session inputs changed");
    }
}
