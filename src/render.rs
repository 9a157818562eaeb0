//! Rendering of the trained weight grid as an image.

use crate::error::{KohonenError, Result};
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use ndarray::ArrayView3;
use std::path::Path;

/// Renders the weight grid as an image.
///
/// Lattice cell `(x, y)` becomes a `cell_size` x `cell_size` pixel block at
/// image position `(x, y)`; components are clamped to `[0, 1]` and scaled to
/// `u8`. The input dimension selects the pixel format: 1 renders greyscale,
/// 3 RGB, 4 RGBA. Any other dimension is a render error.
pub fn render(weights: ArrayView3<'_, f64>, cell_size: u32) -> Result<DynamicImage> {
    if cell_size == 0 {
        return Err(KohonenError::Render(
            "Cell size must be positive".to_string(),
        ));
    }

    let (width, height, input_dim) = weights.dim();
    let img_width = width as u32 * cell_size;
    let img_height = height as u32 * cell_size;
    let cell = |px: u32, py: u32| ((px / cell_size) as usize, (py / cell_size) as usize);

    match input_dim {
        1 => {
            let img = ImageBuffer::from_fn(img_width, img_height, |px, py| {
                let (x, y) = cell(px, py);
                Luma([level(weights[[x, y, 0]])])
            });
            Ok(DynamicImage::ImageLuma8(img))
        }
        3 => {
            let img = ImageBuffer::from_fn(img_width, img_height, |px, py| {
                let (x, y) = cell(px, py);
                Rgb([
                    level(weights[[x, y, 0]]),
                    level(weights[[x, y, 1]]),
                    level(weights[[x, y, 2]]),
                ])
            });
            Ok(DynamicImage::ImageRgb8(img))
        }
        4 => {
            let img = ImageBuffer::from_fn(img_width, img_height, |px, py| {
                let (x, y) = cell(px, py);
                Rgba([
                    level(weights[[x, y, 0]]),
                    level(weights[[x, y, 1]]),
                    level(weights[[x, y, 2]]),
                    level(weights[[x, y, 3]]),
                ])
            });
            Ok(DynamicImage::ImageRgba8(img))
        }
        dim => Err(KohonenError::Render(format!(
            "Cannot render weight vectors of dimension {dim} as pixels \
             (expected 1, 3, or 4)"
        ))),
    }
}

/// Renders the weight grid and writes it to `path`.
///
/// The image format follows the file extension.
pub fn save<P: AsRef<Path>>(weights: ArrayView3<'_, f64>, path: P, cell_size: u32) -> Result<()> {
    let img = render(weights, cell_size)?;
    img.save(path.as_ref())
        .map_err(|e| KohonenError::Render(format!("Failed to save image: {e}")))
}

#[inline]
fn level(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
