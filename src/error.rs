use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TintError {
    #[error("Shape mismatch: base is {}x{}, overlay is {}x{}", base.0, base.1, overlay.0, overlay.1)]
    ShapeMismatch {
        base: (u32, u32),
        overlay: (u32, u32),
    },

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("{channel} channel value {value} is outside 0..=255")]
    InvalidColorChannel { channel: &'static str, value: i64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("No {0} available yet")]
    MissingInput(&'static str),

    #[error("Image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid job '{name}': {reason}")]
    InvalidJob { name: String, reason: String },
}

impl TintError {
    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TintError>;
