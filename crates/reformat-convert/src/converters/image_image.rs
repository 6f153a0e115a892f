//! Image → image: decode any supported container and re-encode as the
//! target format, honoring format-specific options (JPEG quality, GIF
//! palette size, alpha preservation).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Frame, ImageFormat, RgbaImage};

use reformat_core::{AppError, AppResult};

use crate::formats::Format;
use crate::options::ConvertOptions;

pub fn convert(
    input: &Path,
    output: &Path,
    target: Format,
    options: &ConvertOptions,
) -> AppResult<()> {
    let decoded = image::open(input)
        .map_err(|e| AppError::conversion(format!("image decode failed: {e}")))?;

    match target {
        Format::Jpeg => encode_jpeg(&decoded, output, options),
        Format::Png => encode_png(&decoded, output, options),
        Format::Gif => encode_gif(&decoded, output, options),
        Format::Bmp => encode_bmp(&decoded, output),
        Format::Pdf | Format::Docx => Err(AppError::internal(format!(
            "image-to-image cannot produce {target}"
        ))),
    }
}

fn encode_jpeg(img: &DynamicImage, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let file = File::create(output)?;
    let encoder =
        JpegEncoder::new_with_quality(BufWriter::new(file), options.clamped_jpeg_quality());
    // JPEG has no alpha channel.
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::conversion(format!("JPEG encode failed: {e}")))
}

fn encode_png(img: &DynamicImage, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let result = if options.preserve_alpha {
        img.save_with_format(output, ImageFormat::Png)
    } else {
        img.to_rgb8().save_with_format(output, ImageFormat::Png)
    };
    result.map_err(|e| AppError::conversion(format!("PNG encode failed: {e}")))
}

fn encode_gif(img: &DynamicImage, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let rgba = if options.preserve_alpha {
        img.to_rgba8()
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8()).to_rgba8()
    };
    let rgba = reduce_palette(rgba, options.clamped_gif_colors());

    let file = File::create(output)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .encode_frame(Frame::new(rgba))
        .map_err(|e| AppError::conversion(format!("GIF encode failed: {e}")))
}

fn encode_bmp(img: &DynamicImage, output: &Path) -> AppResult<()> {
    // BMP output is always flattened RGB.
    img.to_rgb8()
        .save_with_format(output, ImageFormat::Bmp)
        .map_err(|e| AppError::conversion(format!("BMP encode failed: {e}")))
}

/// Quantize to at most `colors` distinct colors with NeuQuant, mapping each
/// pixel to its nearest palette entry. A full 256-color request is left to
/// the GIF encoder's own quantizer.
fn reduce_palette(mut rgba: RgbaImage, colors: usize) -> RgbaImage {
    if colors >= 256 {
        return rgba;
    }
    let quantizer = color_quant::NeuQuant::new(10, colors, rgba.as_raw());
    let palette = quantizer.color_map_rgba();
    for pixel in rgba.pixels_mut() {
        let idx = quantizer.index_of(&pixel.0) * 4;
        pixel.0 = [
            palette[idx],
            palette[idx + 1],
            palette[idx + 2],
            palette[idx + 3],
        ];
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255])
        })
    }

    #[test]
    fn test_png_to_jpeg_round_trip_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("output.jpg");
        gradient(64, 32).save(&input).unwrap();

        convert(&input, &output, Format::Jpeg, &ConvertOptions::default()).unwrap();

        let out = image::open(&output).unwrap();
        assert_eq!((out.width(), out.height()), (64, 32));
    }

    #[test]
    fn test_same_format_round_trip_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("output.png");
        gradient(16, 16).save(&input).unwrap();

        convert(&input, &output, Format::Png, &ConvertOptions::default()).unwrap();
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn test_gif_palette_is_reduced() {
        let reduced = reduce_palette(gradient(32, 32), 8);
        let distinct: HashSet<_> = reduced.pixels().map(|p| p.0).collect();
        assert!(distinct.len() <= 8);
    }

    #[test]
    fn test_gif_output_is_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("output.gif");
        gradient(32, 32).save(&input).unwrap();

        let mut options = ConvertOptions::default();
        options.gif_colors = 16;
        convert(&input, &output, Format::Gif, &options).unwrap();
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn test_bmp_target_is_supported_by_the_capability() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("output.bmp");
        gradient(8, 8).save(&input).unwrap();

        convert(&input, &output, Format::Bmp, &ConvertOptions::default()).unwrap();
        assert!(image::open(&output).is_ok());
    }
}
