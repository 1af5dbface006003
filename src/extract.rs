//! Dominant-color extraction adapter.
//!
//! Wraps the external clustering service: decodes an image, runs k-means
//! over its opaque pixels in Lab space and returns `(color, pixel_count)`
//! pairs. The pipeline consumes only the colors; the counts are part of
//! the collaborator's output contract and are passed through untouched.

use image::{self, DynamicImage, GenericImageView, imageops::FilterType};
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};

use crate::error::{PaletteError, Result};

/// Extract the `n_colors` dominant colors of an image held in memory.
///
/// `downscale`, when given, resizes the longest side to that many pixels
/// (nearest-neighbour) before clustering to cut k-means cost on large
/// inputs. Clustering runs with a fixed seed, so identical inputs always
/// produce identical palettes.
pub fn dominant_colors(
    input: &[u8],
    n_colors: usize,
    downscale: Option<u32>,
) -> Result<Vec<(Srgb<u8>, u32)>> {
    let img = image::load_from_memory(input)
        .map_err(|e| PaletteError::extraction("unable to decode image", e))?;

    let working_img: DynamicImage = if let Some(scale) = downscale {
        let (orig_w, orig_h) = img.dimensions();
        let max_side = orig_w.max(orig_h) as f32;
        let ratio = scale as f32 / max_side;
        let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
        let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
        DynamicImage::ImageRgba8(image::imageops::resize(&img, w, h, FilterType::Nearest))
    } else {
        img
    };

    let raw = working_img.to_rgba8().into_raw();

    // Cluster opaque pixels only; fully transparent ones carry no color.
    let mut lab_pixels: Vec<Lab> = Vec::new();
    for chunk in raw.chunks(4) {
        if chunk[3] == 0 {
            continue;
        }
        let srgb = Srgb::<u8>::new(chunk[0], chunk[1], chunk[2]);
        lab_pixels.push(srgb.into_linear().into_color());
    }

    if lab_pixels.is_empty() {
        return Err(PaletteError::Extraction {
            message: "image has no opaque pixels".into(),
            source: None,
        });
    }

    let kmeans = get_kmeans(n_colors, 20, 1e-4, false, &lab_pixels, 0);

    let mut counts = vec![0u32; kmeans.centroids.len()];
    for &idx in &kmeans.indices {
        counts[idx as usize] += 1;
    }

    let colors = kmeans
        .centroids
        .iter()
        .zip(counts)
        .map(|(&lab, count)| {
            let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
            (rgb_f32.into_format::<u8>(), count)
        })
        .collect();

    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undecodable_input() {
        let result = dominant_colors(b"definitely not an image", 4, None);
        assert!(matches!(result, Err(PaletteError::Extraction { .. })));
    }
}
