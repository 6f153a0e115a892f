//! Image → DOCX: embed the image inline in a fresh document, scaled to the
//! configured width and capped at the configured height, aspect preserved.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Pic, Run};
use image::ImageFormat;

use reformat_core::{AppError, AppResult};

use crate::options::ConvertOptions;

const EMU_PER_INCH: f64 = 914_400.0;

pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> AppResult<()> {
    let decoded = image::open(input)
        .map_err(|e| AppError::conversion(format!("image decode failed: {e}")))?;

    // Word renders PNG everywhere; re-encode so GIF/BMP sources embed too.
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::conversion(format!("image re-encode failed: {e}")))?;

    let aspect = decoded.height() as f64 / decoded.width() as f64;
    let mut width_in = options.docx_image_width;
    let mut height_in = width_in * aspect;
    if height_in > options.docx_image_max_height {
        let ratio = options.docx_image_max_height / height_in;
        height_in = options.docx_image_max_height;
        width_in *= ratio;
    }

    let pic = Pic::new(&png).size(
        (width_in * EMU_PER_INCH) as u32,
        (height_in * EMU_PER_INCH) as u32,
    );

    let file = File::create(output)?;
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)))
        .build()
        .pack(file)
        .map_err(|e| AppError::conversion(format!("DOCX write failed: {e}")))?;

    Ok(())
}
