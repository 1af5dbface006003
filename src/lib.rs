//! Smooth, perceptually ordered color palettes from the dominant colors
//! of an image.
//!
//! The pipeline runs in four stages, each a pure function over a slice of
//! sRGB colors:
//!
//! 1. [`dominant_colors`] — k-means extraction of an image's dominant
//!    colors (the only stage that touches I/O or randomness; the seed is
//!    fixed, so extraction is deterministic too).
//! 2. [`filter_colors`] — drop unwanted colors, exactly or within a
//!    per-channel tolerance band.
//! 3. [`sort_by_lightness`] — order the remaining colors by their HLS
//!    lightness.
//! 4. [`interpolate_gaps`] — expand the sorted palette to a target size,
//!    giving visually larger gaps more interpolated colors.
//!
//! [`sample_evenly`] then draws a small representative palette from the
//! expanded gradient at a uniform stride.
//!
//! ```
//! use palette::Srgb;
//! use smooth_palette::{SmoothOptions, sample_evenly, smooth_palette};
//!
//! let dominant = [
//!     Srgb::new(255u8, 255, 255), // dropped by the default exclusion list
//!     Srgb::new(12u8, 48, 96),
//!     Srgb::new(200u8, 160, 40),
//! ];
//! let options = SmoothOptions { total: 40, ..SmoothOptions::default() };
//! let gradient = smooth_palette(&dominant, &options)?;
//! assert_eq!(gradient.len(), 40);
//!
//! let summary = sample_evenly(&gradient, 3)?;
//! assert_eq!(summary.len(), 3);
//! # Ok::<(), smooth_palette::PaletteError>(())
//! ```

use std::collections::HashSet;

use palette::{FromColor, Hsl, Srgb};

pub mod error;
pub mod extract;

pub use error::{PaletteError, Result};
pub use extract::dominant_colors;

/// Tuning for one palette run.
///
/// `Default` builds a fresh value per call (exclude white and black,
/// exact matching, tolerance 5, 100-color gradient); there is no shared
/// default state between runs.
#[derive(Debug, Clone)]
pub struct SmoothOptions {
    /// Colors to drop from the extracted set before sorting.
    pub exclude: Vec<Srgb<u8>>,
    /// Exact matching against `exclude`; when false, a color is dropped
    /// if every channel lies within `tolerance` of an excluded color.
    pub exact_exclusion: bool,
    /// Per-channel band width used when `exact_exclusion` is false.
    pub tolerance: u8,
    /// Length of the expanded palette.
    pub total: usize,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self {
            exclude: vec![Srgb::new(255, 255, 255), Srgb::new(0, 0, 0)],
            exact_exclusion: true,
            tolerance: 5,
            total: 100,
        }
    }
}

/// Run the whole smoothing pipeline on an already-extracted color set:
/// exclusion filter, lightness sort, gap-proportional interpolation.
pub fn smooth_palette(colors: &[Srgb<u8>], options: &SmoothOptions) -> Result<Vec<Srgb<u8>>> {
    let kept = filter_colors(
        colors,
        &options.exclude,
        options.exact_exclusion,
        options.tolerance,
    );
    let sorted = sort_by_lightness(&kept);
    interpolate_gaps(&sorted, options.total)
}

/// Decode an image held in memory, extract its `n_colors` dominant
/// colors and run [`smooth_palette`] on them.
pub fn smooth_palette_bytes(
    input: &[u8],
    n_colors: usize,
    options: &SmoothOptions,
) -> Result<Vec<Srgb<u8>>> {
    let extracted = extract::dominant_colors(input, n_colors, None)?;
    let colors: Vec<Srgb<u8>> = extracted.into_iter().map(|(color, _)| color).collect();
    smooth_palette(&colors, options)
}

/// Remove the `exclude` colors from `colors`, returning a new vector.
///
/// With `exact` matching the input is first deduplicated (keeping the
/// first occurrence of each color) and only bit-equal colors are
/// removed; exclusion colors absent from the set are silently ignored.
/// Otherwise a color is removed when all three of its channels lie
/// within `±tolerance` of the corresponding channels of some exclusion
/// color, so each exclusion carves a cube out of the color space.
pub fn filter_colors(
    colors: &[Srgb<u8>],
    exclude: &[Srgb<u8>],
    exact: bool,
    tolerance: u8,
) -> Vec<Srgb<u8>> {
    if exact {
        let mut seen = HashSet::new();
        colors
            .iter()
            .copied()
            .filter(|color| seen.insert(color.into_components()))
            .filter(|color| !exclude.contains(color))
            .collect()
    } else {
        colors
            .iter()
            .copied()
            .filter(|color| !exclude.iter().any(|e| within_band(*color, *e, tolerance)))
            .collect()
    }
}

fn within_band(color: Srgb<u8>, center: Srgb<u8>, tolerance: u8) -> bool {
    let near = |a: u8, b: u8| (a as i16 - b as i16).abs() <= tolerance as i16;
    near(color.red, center.red)
        && near(color.green, center.green)
        && near(color.blue, center.blue)
}

/// Sort colors by ascending HLS lightness.
///
/// Each color is converted to HLS (channels normalized to [0, 1]),
/// stable-sorted on the lightness component so that equal-lightness
/// colors keep their relative order, and converted back to sRGB with
/// every channel rounded up to the nearest integer.
pub fn sort_by_lightness(colors: &[Srgb<u8>]) -> Vec<Srgb<u8>> {
    let mut hls: Vec<Hsl<_, f64>> = colors
        .iter()
        .map(|&color| Hsl::from_color(color.into_format::<f64>()))
        .collect();
    hls.sort_by(|a, b| a.lightness.total_cmp(&b.lightness));
    hls.into_iter()
        .map(|hsl| {
            let rgb: Srgb<f64> = Srgb::from_color(hsl);
            Srgb::new(
                ceil_channel(rgb.red),
                ceil_channel(rgb.green),
                ceil_channel(rgb.blue),
            )
        })
        .collect()
}

fn ceil_channel(value: f64) -> u8 {
    // The saturating cast covers the one-ulp overshoot a float
    // round-trip can produce at 255.
    (value * 255.0).ceil() as u8
}

/// Expand a lightness-sorted palette to exactly `total` colors.
///
/// Each adjacent pair's spacing is the absolute value of the mean signed
/// per-channel difference between its two colors. The `total - len`
/// insertion budget is split across the pairs proportionally to their
/// spacing, the interpolated colors are evenly spaced strictly between
/// the pair's endpoints, and any rounding shortfall goes to the earliest
/// pairs so the output length is exact.
///
/// # Errors
///
/// [`PaletteError::EmptyInput`] when fewer than two colors are given,
/// [`PaletteError::InvalidTarget`] when `total` is below the input
/// length, and [`PaletteError::DegenerateSpacing`] when every pair's
/// spacing is zero; the budget is never silently clamped.
pub fn interpolate_gaps(sorted: &[Srgb<u8>], total: usize) -> Result<Vec<Srgb<u8>>> {
    let m = sorted.len();
    if m < 2 {
        return Err(PaletteError::EmptyInput { count: m });
    }
    if total < m {
        return Err(PaletteError::InvalidTarget { total, len: m });
    }
    let budget = total - m;

    let spacings: Vec<f64> = sorted.windows(2).map(|w| spacing(w[0], w[1])).collect();
    let spacing_sum: f64 = spacings.iter().sum();
    if spacing_sum == 0.0 {
        return Err(PaletteError::DegenerateSpacing);
    }

    // Insertion slots per gap, proportional to its share of the total
    // spacing; truncation keeps the sum at or below the budget.
    let mut slots: Vec<usize> = spacings
        .iter()
        .map(|s| ((s / spacing_sum) * budget as f64) as usize)
        .collect();

    // Hand the truncation shortfall out one slot at a time, earliest
    // gaps first.
    let assigned: usize = slots.iter().sum();
    for slot in slots.iter_mut().take(budget - assigned) {
        *slot += 1;
    }

    let mut expanded = Vec::with_capacity(total);
    for (pair, &s) in sorted.windows(2).zip(&slots) {
        expanded.push(pair[0]);
        for j in 1..=s {
            expanded.push(lerp(pair[0], pair[1], j, s));
        }
    }
    expanded.push(sorted[m - 1]);

    debug_assert_eq!(expanded.len(), total);
    Ok(expanded)
}

/// Absolute value of the mean signed per-channel difference. Channel
/// differences of opposite sign cancel, so such a gap scores zero even
/// when the colors differ.
fn spacing(left: Srgb<u8>, right: Srgb<u8>) -> f64 {
    let dr = left.red as f64 - right.red as f64;
    let dg = left.green as f64 - right.green as f64;
    let db = left.blue as f64 - right.blue as f64;
    ((dr + dg + db) / 3.0).abs()
}

/// The `j`-th of `s` interior points of the per-channel linear space
/// from `left` to `right`, endpoints excluded, channels rounded up.
fn lerp(left: Srgb<u8>, right: Srgb<u8>, j: usize, s: usize) -> Srgb<u8> {
    let channel = |l: u8, r: u8| {
        let step = (r as f64 - l as f64) / (s as f64 + 1.0);
        (l as f64 + step * j as f64).ceil() as u8
    };
    Srgb::new(
        channel(left.red, right.red),
        channel(left.green, right.green),
        channel(left.blue, right.blue),
    )
}

/// Draw `k` colors from an ordered palette at a uniform index stride,
/// always keeping the palette's first and last color.
///
/// # Errors
///
/// [`PaletteError::InvalidSampleRequest`] when `k < 2` or the palette is
/// shorter than `k - 1`, which would make the stride zero; the request
/// is never truncated to fit.
pub fn sample_evenly(palette: &[Srgb<u8>], k: usize) -> Result<Vec<Srgb<u8>>> {
    if k < 2 {
        return Err(PaletteError::InvalidSampleRequest {
            k,
            len: palette.len(),
        });
    }
    let n_splits = k - 1;
    let stride = palette.len() / n_splits;
    if stride == 0 {
        return Err(PaletteError::InvalidSampleRequest {
            k,
            len: palette.len(),
        });
    }

    let mut drawn = Vec::with_capacity(k);
    drawn.push(palette[0]);
    for i in 1..=(k - 2) {
        drawn.push(palette[i * stride]);
    }
    drawn.push(palette[palette.len() - 1]);
    Ok(drawn)
}
