use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use palette::Srgb;
use smooth_palette::{SmoothOptions, dominant_colors, sample_evenly, smooth_palette};

/// Derive a smooth, ordered color palette from an image's dominant colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of dominant colors to extract with k-means
    #[arg(short = 'k', long, default_value_t = 8)]
    n_colors: usize,

    /// Comma-separated hex colors to drop from the extracted set
    #[arg(short = 'x', long, default_value = "FFFFFF,000000")]
    exclude: String,

    /// Drop colors within a per-channel band around the excluded ones
    /// instead of requiring an exact match
    #[arg(long)]
    fuzzy: bool,

    /// Channel band width used with --fuzzy
    #[arg(short, long, default_value_t = 5)]
    tolerance: u8,

    /// Size of the smoothed palette
    #[arg(long, default_value_t = 100)]
    total: usize,

    /// Number of representative colors drawn from the smoothed palette
    #[arg(short, long, default_value_t = 3)]
    samples: usize,

    /// Down-sample size (longest side) before clustering
    #[arg(short, long)]
    downscale: Option<u32>,

    /// Print one JSON object per image instead of hex lines
    #[arg(long)]
    json: bool,
}

fn parse_hex(s: &str) -> Result<Srgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        bail!("hex color must be 6 characters: {s}");
    }
    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok(Srgb::new(r, g, b))
}

fn hex(color: Srgb<u8>) -> String {
    format!("{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let exclude = args
        .exclude
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_hex)
        .collect::<Result<Vec<_>>>()?;

    let options = SmoothOptions {
        exclude,
        exact_exclusion: !args.fuzzy,
        tolerance: args.tolerance,
        total: args.total,
    };

    for input in &args.inputs {
        let bytes =
            fs::read(input).with_context(|| format!("unable to read {}", input.display()))?;
        let extracted = dominant_colors(&bytes, args.n_colors, args.downscale)
            .with_context(|| format!("extraction failed for {}", input.display()))?;
        let colors: Vec<Srgb<u8>> = extracted.into_iter().map(|(color, _)| color).collect();
        let gradient = smooth_palette(&colors, &options)
            .with_context(|| format!("smoothing failed for {}", input.display()))?;
        let drawn = sample_evenly(&gradient, args.samples)?;

        if args.json {
            let out = serde_json::json!({
                "file": input.display().to_string(),
                "palette": gradient.iter().copied().map(hex).collect::<Vec<_>>(),
                "samples": drawn.iter().copied().map(hex).collect::<Vec<_>>(),
            });
            println!("{out}");
        } else {
            let line = drawn.iter().copied().map(hex).collect::<Vec<_>>().join(" ");
            println!("{} → {line}", input.display());
        }
    }

    Ok(())
}
