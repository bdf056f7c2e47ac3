//! Image rotation for the multi-angle face search.
//!
//! Rotates about the integer pixel center with bilinear interpolation and
//! replicate-border fill, keeping the output dimensions identical to the
//! input so detector coordinates stay comparable across angles.

use image::{Rgb, RgbImage};

/// Bilinear sample at a fractional coordinate with replicate-border fill.
pub(crate) fn sample_bilinear(image: &RgbImage, x: f32, y: f32) -> [f32; 3] {
    let w = image.width() as i64;
    let h = image.height() as i64;

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let xi0 = (x0 as i64).clamp(0, w - 1) as u32;
    let xi1 = (x0 as i64 + 1).clamp(0, w - 1) as u32;
    let yi0 = (y0 as i64).clamp(0, h - 1) as u32;
    let yi1 = (y0 as i64 + 1).clamp(0, h - 1) as u32;

    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let tl = image.get_pixel(xi0, yi0).0[c] as f32;
        let tr = image.get_pixel(xi1, yi0).0[c] as f32;
        let bl = image.get_pixel(xi0, yi1).0[c] as f32;
        let br = image.get_pixel(xi1, yi1).0[c] as f32;

        out[c] = tl * (1.0 - fx) * (1.0 - fy)
            + tr * fx * (1.0 - fy)
            + bl * (1.0 - fx) * fy
            + br * fx * fy;
    }
    out
}

/// Rotate an image by `angle_degrees` about its integer center.
///
/// Output has the same dimensions; pixels mapped from outside the source
/// replicate the nearest border pixel.
pub fn rotate_about_center(image: &RgbImage, angle_degrees: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let cx = (width / 2) as f32;
    let cy = (height / 2) as f32;

    RgbImage::from_fn(width, height, |x, y| {
        // Inverse map: rotate the destination pixel back into the source.
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let sx = cos * dx - sin * dy + cx;
        let sy = sin * dx + cos * dy + cy;

        let rgb = sample_bilinear(image, sx, sy);
        Rgb([
            rgb[0].round().clamp(0.0, 255.0) as u8,
            rgb[1].round().clamp(0.0, 255.0) as u8,
            rgb[2].round().clamp(0.0, 255.0) as u8,
        ])
    })
}
