//! Face crop quality scoring.
//!
//! Combines a normalized crop-size term with a sharpness term (variance of
//! the Laplacian of the grayscale crop, a classic focus measure) into a
//! single 0-100 score. Pure pixel math, deterministic, recomputed per crop.

use image::RgbImage;

/// Crops at or above 150x150 pixels saturate the size term.
const SIZE_SATURATION_AREA: f64 = 150.0 * 150.0;
/// Empirical Laplacian-variance saturation for the sharpness term.
const BLUR_SATURATION: f64 = 120.0;
const SIZE_WEIGHT: f64 = 0.6;
const BLUR_WEIGHT: f64 = 0.4;

/// Score a detected face crop for usability, in [0, 100].
///
/// `bbox` is `[x1, y1, x2, y2]` in pixel coordinates; it is clamped to the
/// image bounds, and a crop of zero area yields 0.
pub fn estimate_quality(bbox: [i32; 4], image: &RgbImage) -> u8 {
    let w = image.width() as i64;
    let h = image.height() as i64;
    let x1 = (bbox[0] as i64).clamp(0, w);
    let y1 = (bbox[1] as i64).clamp(0, h);
    let x2 = (bbox[2] as i64).clamp(0, w);
    let y2 = (bbox[3] as i64).clamp(0, h);

    if x2 <= x1 || y2 <= y1 {
        return 0;
    }

    let crop_w = (x2 - x1) as usize;
    let crop_h = (y2 - y1) as usize;

    let gray = gray_crop(image, x1 as u32, y1 as u32, crop_w, crop_h);
    let sharpness = laplacian_variance(&gray, crop_w, crop_h);

    let size_score = ((crop_w * crop_h) as f64 / SIZE_SATURATION_AREA).min(1.0);
    let blur_score = (sharpness / BLUR_SATURATION).min(1.0);

    ((SIZE_WEIGHT * size_score + BLUR_WEIGHT * blur_score) * 100.0) as u8
}

/// Extract a grayscale crop using BT.601 luma weights.
fn gray_crop(image: &RgbImage, x: u32, y: u32, w: usize, h: usize) -> Vec<f64> {
    let mut gray = Vec::with_capacity(w * h);
    for dy in 0..h {
        for dx in 0..w {
            let px = image.get_pixel(x + dx as u32, y + dy as u32).0;
            gray.push(0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64);
        }
    }
    gray
}

/// Variance of the 4-neighbour Laplacian over interior pixels.
///
/// Higher variance implies sharper edges. Crops smaller than 3x3 have no
/// interior and score 0.
fn laplacian_variance(gray: &[f64], w: usize, h: usize) -> f64 {
    if w < 3 || h < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = gray[y * w + x];
            let top = gray[(y - 1) * w + x];
            let bottom = gray[(y + 1) * w + x];
            let left = gray[y * w + x - 1];
            let right = gray[y * w + x + 1];

            let lap = top + bottom + left + right - 4.0 * center;
            sum += lap;
            sum_sq += lap * lap;
            count += 1;
        }
    }

    let mean = sum / count as f64;
    (sum_sq / count as f64) - (mean * mean)
}
