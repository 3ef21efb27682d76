//! Geometric correction from the square-array embedding to a regular hexagon.

use image::{Rgba, RgbaImage, imageops};

/// Shear angle that turns the axial embedding into a regular hexagon.
pub const SHEAR_DEGREES: f64 = -30.0;

/// Shear horizontally by `degrees`, widening the canvas to fit.
///
/// Rows are shifted around the vertical center; pixels that map outside the
/// source are left fully transparent.
pub fn shear_horizontal(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let (width, height) = src.dimensions();
    let k = degrees.to_radians().tan();
    let extra = (f64::from(height) * k.abs()) as u32;
    let dx = i64::from(extra / 2);
    let pivot_y = i64::from(height / 2);

    RgbaImage::from_fn(width + extra, height, |x, y| {
        let iy = i64::from(y) - pivot_y;
        let sx = i64::from(x) - dx + (iy as f64 * k) as i64;
        if (0..i64::from(width)).contains(&sx) {
            *src.get_pixel(sx as u32, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Crop a `size` x `size` window back out of an image sheared by `degrees`.
pub fn crop_sheared(img: &RgbaImage, size: u32, degrees: f64) -> RgbaImage {
    let offset = (f64::from(size) * degrees.to_radians().tan().abs() / 2.0) as u32;
    imageops::crop_imm(img, offset, 0, size, size).to_image()
}

/// Make every pixel opaque, turning exposed background black.
pub fn fill_alpha(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        pixel.0[3] = u8::MAX;
    }
}
