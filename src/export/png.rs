//! PNG export for rendered images and previews.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{GrayImage, ImageEncoder, RgbaImage};
use thiserror::Error;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Writes an RGBA8 image as a PNG file, creating parent directories.
///
/// # Arguments
/// * `img` - The rendered image
/// * `path` - Output file path
/// * `options` - Compression and filter settings
///
/// # Returns
/// `Ok(())` on success, or an error if the file cannot be created or encoded
pub fn export_png(
    img: &RgbaImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    write_png(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
        path,
        options,
    )
}

/// Writes an 8-bit grayscale image as a PNG file, creating parent directories.
pub fn export_gray_png(
    img: &GrayImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    write_png(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
        path,
        options,
    )
}

fn write_png(
    data: &[u8],
    width: u32,
    height: u32,
    color: image::ExtendedColorType,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(data, width, height, color)?;

    log::info!("wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}
