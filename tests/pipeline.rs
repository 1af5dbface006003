//! End-to-end tests over synthetic images encoded in memory.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use smooth_palette::{SmoothOptions, dominant_colors, sample_evenly, smooth_palette_bytes};

const TEAL: [u8; 3] = [20, 60, 90];
const ORANGE: [u8; 3] = [230, 140, 30];

/// A 64x64 PNG split into white, black, teal and orange quadrants.
fn quadrant_image() -> Vec<u8> {
    let mut img = RgbImage::new(64, 64);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb(match (x < 32, y < 32) {
            (true, true) => [255, 255, 255],
            (false, true) => [0, 0, 0],
            (true, false) => TEAL,
            (false, false) => ORANGE,
        });
    }
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("png encode");
    buf
}

#[test]
fn extraction_accounts_for_every_opaque_pixel() {
    let png = quadrant_image();
    let extracted = dominant_colors(&png, 4, None).unwrap();

    assert!(!extracted.is_empty());
    assert!(extracted.len() <= 4);
    let total_pixels: u32 = extracted.iter().map(|(_, count)| count).sum();
    assert_eq!(total_pixels, 64 * 64);
}

#[test]
fn pipeline_produces_requested_sizes() {
    let png = quadrant_image();
    // fuzzy exclusion absorbs the ±1 wobble k-means leaves on the pure
    // white and black quadrants
    let options = SmoothOptions {
        exact_exclusion: false,
        tolerance: 8,
        total: 50,
        ..SmoothOptions::default()
    };

    let gradient = smooth_palette_bytes(&png, 4, &options).unwrap();
    assert_eq!(gradient.len(), 50);

    let summary = sample_evenly(&gradient, 3).unwrap();
    assert_eq!(summary.len(), 3);
    assert_eq!(summary.first(), gradient.first());
    assert_eq!(summary.last(), gradient.last());
}

#[test]
fn extraction_is_deterministic() {
    let png = quadrant_image();
    let first = dominant_colors(&png, 4, None).unwrap();
    let second = dominant_colors(&png, 4, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn downscaled_extraction_still_covers_the_image() {
    let png = quadrant_image();
    let extracted = dominant_colors(&png, 4, Some(16)).unwrap();
    let total_pixels: u32 = extracted.iter().map(|(_, count)| count).sum();
    assert_eq!(total_pixels, 16 * 16);
}
