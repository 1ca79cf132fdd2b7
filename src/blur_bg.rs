//! Blurred background master generation
//!
//! Rebuilds the icon background by compositing a heavily blurred, zoomed-in
//! copy of the artwork over a solid layer of its average color, then placing
//! the untouched artwork on top and flattening the result to opaque RGB.

use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::{self, FilterType},
    ColorType, DynamicImage, ImageEncoder, RgbImage, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Gaussian blur sigma applied to the zoomed texture.
const BLUR_SIGMA: f32 = 50.0;

/// Generate the background master for `source` and write it to `output`.
///
/// Failures never escape: a missing source file or any processing error is
/// reported on the console and the function returns normally, leaving no
/// partial output behind in the missing-source case.
pub fn generate(source: &Path, output: &Path) {
    if !source.exists() {
        println!("Error: Source file not found at {}", source.display());
        return;
    }

    if let Err(err) = render_master(source, output) {
        println!("An error occurred: {err:#}");
    }
}

fn render_master(source_path: &Path, output_path: &Path) -> Result<()> {
    let source = image::open(source_path)
        .with_context(|| format!("Failed to load {}", source_path.display()))?
        .to_rgba8();
    let (width, height) = source.dimensions();
    println!("Source size: {width}x{height}");

    let avg = average_color(&source);
    println!("Average color: {:?}", avg.0);

    let texture = zoomed_blur_layer(&source);
    let background = compose_background(avg, &texture);
    let master = flatten_over_background(background, &source);

    write_png(&master, output_path)?;
    println!(
        "✓ Saved blurred background master to {}",
        output_path.display()
    );

    Ok(())
}

/// Average color of the image, taken as a 1x1 Lanczos downsample.
fn average_color(source: &RgbaImage) -> Rgba<u8> {
    *imageops::resize(source, 1, 1, FilterType::Lanczos3).get_pixel(0, 0)
}

/// Central 50% crop of the source, scaled back up to full size and blurred.
/// This assumes the artwork is roughly centered, so the crop picks up its
/// dominant colors rather than the transparent corners.
fn zoomed_blur_layer(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let left = (width as f32 * 0.25) as u32;
    let top = (height as f32 * 0.25) as u32;
    let right = (width as f32 * 0.75) as u32;
    let bottom = (height as f32 * 0.75) as u32;

    let crop = imageops::crop_imm(source, left, top, (right - left).max(1), (bottom - top).max(1))
        .to_image();
    let zoomed = imageops::resize(&crop, width, height, FilterType::Lanczos3);

    imageops::blur(&zoomed, BLUR_SIGMA)
}

/// Composite the blurred texture over a solid layer of the average color,
/// filling whatever transparency the texture still carries.
fn compose_background(avg: Rgba<u8>, texture: &RgbaImage) -> RgbaImage {
    let (width, height) = texture.dimensions();
    let mut background = RgbaImage::from_pixel(width, height, avg);
    imageops::overlay(&mut background, texture, 0, 0);
    background
}

/// Composite the untouched source over the background and drop the alpha
/// channel. Both layers share the source dimensions, so the overlay lands at
/// the origin with no clipping.
fn flatten_over_background(mut background: RgbaImage, source: &RgbaImage) -> RgbImage {
    imageops::overlay(&mut background, source, 0, 0);
    DynamicImage::ImageRgba8(background).to_rgb8()
}

// Encode the master as PNG with maximum compression
fn write_png(master: &RgbImage, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(master.as_raw(), master.width(), master.height(), ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    out.flush().context("Failed to write PNG")?;

    Ok(())
}
