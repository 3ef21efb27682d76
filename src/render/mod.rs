//! Rendering of a finished grid to a grayscale PNG.
//!
//! The grid's pixel at column `i`, row `j` takes the coldness of cell
//! `(i, j)`. The square-array embedding squashes the hexagon, so the raw
//! image is sheared, cropped back to `size` x `size` and made opaque.

mod transform;

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::compute::Grid;

pub use transform::{SHEAR_DEGREES, crop_sheared, fill_alpha, shear_horizontal};

/// Rendering and encoding errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to create output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Map coldness to an 8-bit gray level, saturating at 1.0.
#[inline]
pub fn intensity(coldness: f64) -> u8 {
    (coldness * 255.0).clamp(0.0, 255.0) as u8
}

/// Draw the raw grid without geometric correction.
pub fn to_image(grid: &Grid) -> RgbaImage {
    let size = grid.size() as u32;
    RgbaImage::from_fn(size, size, |x, y| {
        let g = intensity(grid.coldness(x as usize, y as usize));
        Rgba([g, g, g, u8::MAX])
    })
}

/// Draw the grid as a regular hexagon.
pub fn render(grid: &Grid) -> RgbaImage {
    let size = grid.size() as u32;
    let sheared = shear_horizontal(&to_image(grid), SHEAR_DEGREES);
    let mut img = crop_sheared(&sheared, size, SHEAR_DEGREES);
    fill_alpha(&mut img);
    img
}

/// Render and write a PNG, creating parent directories as needed.
pub fn save_png<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<(), RenderError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    render(grid).save(path)?;
    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_intensity_saturates() {
        assert_eq!(intensity(0.0), 0);
        assert_eq!(intensity(0.5), 127);
        assert_eq!(intensity(1.0), 255);
        assert_eq!(intensity(3.7), 255);
        assert_eq!(intensity(-0.2), 0);
    }

    #[test]
    fn test_raw_image_layout() {
        let mut grid = Grid::new(8).unwrap();
        grid.set_coldness(2, 5, 1.0);

        let img = to_image(&grid);
        assert_eq!(img.get_pixel(2, 5).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(5, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_is_square_and_opaque() {
        let mut grid = Grid::new(32).unwrap();
        grid.set_coldness(16, 16, 1.0);

        let img = render(&grid);
        assert_eq!(img.dimensions(), (32, 32));
        assert!(img.pixels().all(|p| p.0[3] == 255));
        assert!(img.pixels().any(|p| p.0[0] == 255));
    }

    #[test]
    fn test_save_png_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snowflakes").join("flake.png");
        let grid = Grid::new(16).unwrap();

        save_png(&grid, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
    }
}
