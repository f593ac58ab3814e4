//! Export module for saving rendered images.
//!
//! Rendered terrain is written as 8-bit RGBA PNG, noise previews as
//! 8-bit grayscale PNG.

mod png;

pub use png::{export_gray_png, export_png, PngExportError, PngExportOptions};
