//! Image → PDF: one A4 page, image scaled to fit the width constraint
//! while preserving aspect ratio, anchored at the configured margins.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// printpdf embeds via its own `image` re-export; decode with that version
// so the DynamicImage types line up.
use printpdf::image_crate;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use reformat_core::{AppError, AppResult};

use crate::converters::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::options::ConvertOptions;

// Images are embedded at a fixed resolution; placement is done by scaling.
const EMBED_DPI: f64 = 300.0;

pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let decoded = image_crate::open(input)
        .map_err(|e| AppError::conversion(format!("image decode failed: {e}")))?;
    let px_w = decoded.width() as f64;
    let px_h = decoded.height() as f64;

    // Pixel dimensions are taken as millimeters, then clamped to the
    // configured maximum width with the aspect ratio preserved.
    let mut width_mm = px_w;
    let mut height_mm = px_h;
    if width_mm > options.max_image_width {
        let ratio = options.max_image_width / width_mm;
        width_mm = options.max_image_width;
        height_mm *= ratio;
    }

    let (doc, page, layer) = PdfDocument::new(
        "Converted image",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    // PDF transparency groups are not produced here; flatten to RGB.
    let flattened = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let embedded = Image::from_dynamic_image(&flattened);

    let native_w_mm = px_w * 25.4 / EMBED_DPI;
    let native_h_mm = px_h * 25.4 / EMBED_DPI;

    // Placement math stays in f64; printpdf's geometry types are f32, so
    // values are narrowed at the call boundary.
    embedded.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(options.margin_left as f32)),
            // printpdf's origin is the bottom-left corner.
            translate_y: Some(Mm((PAGE_HEIGHT_MM - options.margin_top - height_mm) as f32)),
            scale_x: Some((width_mm / native_w_mm) as f32),
            scale_y: Some((height_mm / native_h_mm) as f32),
            dpi: Some(EMBED_DPI as f32),
            ..Default::default()
        },
    );

    let file = File::create(output)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| AppError::conversion(format!("PDF write failed: {e}")))?;

    Ok(())
}
