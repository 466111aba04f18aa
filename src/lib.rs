pub mod batch;
pub mod color;
pub mod colorize;
pub mod composite;
pub mod error;
pub mod helper;
pub mod image_io;
pub mod manifest;
pub mod session;

pub use color::ColorChoice;
pub use colorize::colorize;
pub use composite::composite;
pub use error::{Result, TintError};
