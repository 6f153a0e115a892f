//! Converter dispatch: classify the source file, branch on the requested
//! target, and drive the selected capability.
//!
//! Dispatch is a tagged-variant lookup over (source class, target format);
//! there is no runtime registration and no inheritance chain.

use std::path::{Path, PathBuf};

use reformat_core::{AppError, AppResult};

use crate::converters;
use crate::formats::{extension_of, Format, SourceClass};
use crate::options::ConvertOptions;
use crate::pdftotext;

/// A selected (source → target) conversion capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Place an image on a single PDF page, scaled to fit the width
    /// constraint, anchored at the configured margins.
    ImageToPdf,
    /// Walk DOCX paragraphs/runs and reproduce them as styled PDF text.
    DocxToPdf,
    /// Embed an image inline in a new DOCX, scaled to the configured width.
    ImageToDocx,
    /// Extract PDF text via `pdftotext` and emit one DOCX paragraph per
    /// blank-line-separated block. Lossy: layout and images are dropped.
    PdfToDocx,
    /// Decode any supported image container and re-encode as the target.
    ImageToImage(Format),
}

impl Conversion {
    /// Select the capability for converting `source_filename` into `target`.
    ///
    /// The source format is always inferred from the filename extension.
    /// Same-format requests are a hard error except for image formats,
    /// which may legitimately round-trip.
    pub fn select(source_filename: &str, target: Format) -> AppResult<Self> {
        let ext = extension_of(source_filename).ok_or_else(|| {
            AppError::validation(format!(
                "cannot determine source format of '{source_filename}': no file extension"
            ))
        })?;
        let source = Format::parse(&ext).ok_or_else(|| {
            AppError::unsupported_conversion(format!("unsupported file type: .{ext}"))
        })?;

        if source == target && source.source_class() != SourceClass::Image {
            return Err(AppError::unsupported_conversion(format!(
                "file is already in {target} format"
            )));
        }

        match (source.source_class(), target) {
            (SourceClass::Image, Format::Pdf) => Ok(Self::ImageToPdf),
            (SourceClass::Docx, Format::Pdf) => Ok(Self::DocxToPdf),
            (SourceClass::Image, Format::Docx) => Ok(Self::ImageToDocx),
            (SourceClass::Pdf, Format::Docx) => Ok(Self::PdfToDocx),
            (SourceClass::Image, t) if t.source_class() == SourceClass::Image => {
                Ok(Self::ImageToImage(t))
            }
            _ => Err(AppError::unsupported_conversion(format!(
                "unsupported conversion: {source} to {target}"
            ))),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageToPdf => "image-to-pdf",
            Self::DocxToPdf => "docx-to-pdf",
            Self::ImageToDocx => "image-to-docx",
            Self::PdfToDocx => "pdf-to-docx",
            Self::ImageToImage(_) => "image-to-image",
        }
    }

    /// Execute the selected capability, writing the artifact to `output`.
    ///
    /// Codec work is CPU-bound and runs on the blocking pool; the
    /// `pdftotext` extraction step runs as an async subprocess. Errors from
    /// the underlying capability are propagated with stage context, never
    /// swallowed.
    pub async fn run(
        self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
        pdftotext_bin: &str,
    ) -> AppResult<()> {
        tracing::debug!(conversion = self.name(), input = %input.display(), "Running conversion");

        let input = input.to_path_buf();
        let output = output.to_path_buf();
        let options = options.clone();

        match self {
            Self::ImageToPdf => {
                run_blocking(move || converters::image_pdf::convert(&input, &output, &options))
                    .await
            }
            Self::DocxToPdf => {
                run_blocking(move || converters::docx_pdf::convert(&input, &output, &options))
                    .await
            }
            Self::ImageToDocx => {
                run_blocking(move || converters::image_docx::convert(&input, &output, &options))
                    .await
            }
            Self::PdfToDocx => {
                let text = pdftotext::extract_text(pdftotext_bin, &input).await?;
                run_blocking(move || converters::pdf_docx::convert(&text, &output)).await
            }
            Self::ImageToImage(target) => {
                run_blocking(move || {
                    converters::image_image::convert(&input, &output, target, &options)
                })
                .await
            }
        }
    }
}

async fn run_blocking<F>(f: F) -> AppResult<()>
where
    F: FnOnce() -> AppResult<()> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("conversion task failed: {e}")))?
}

/// The output path for a conversion: `<dir>/output.<target-ext>`.
///
/// A fixed stem inside the request-scoped staging directory can never
/// collide with the staged input, even for image round-trips.
pub fn output_path(dir: &Path, target: Format) -> PathBuf {
    dir.join(format!("output.{}", target.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reformat_core::error::ErrorKind;

    #[test]
    fn test_select_supported_pairs() {
        assert_eq!(
            Conversion::select("photo.png", Format::Pdf).unwrap(),
            Conversion::ImageToPdf
        );
        assert_eq!(
            Conversion::select("report.docx", Format::Pdf).unwrap(),
            Conversion::DocxToPdf
        );
        assert_eq!(
            Conversion::select("photo.jpeg", Format::Docx).unwrap(),
            Conversion::ImageToDocx
        );
        assert_eq!(
            Conversion::select("paper.pdf", Format::Docx).unwrap(),
            Conversion::PdfToDocx
        );
        assert_eq!(
            Conversion::select("photo.bmp", Format::Gif).unwrap(),
            Conversion::ImageToImage(Format::Gif)
        );
    }

    #[test]
    fn test_image_round_trip_is_selected() {
        assert_eq!(
            Conversion::select("photo.jpg", Format::Jpeg).unwrap(),
            Conversion::ImageToImage(Format::Jpeg)
        );
    }

    #[test]
    fn test_same_document_format_is_rejected() {
        let err = Conversion::select("report.docx", Format::Docx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConversion);
        assert!(err.message.contains("already in docx format"));

        let err = Conversion::select("paper.pdf", Format::Pdf).unwrap_err();
        assert!(err.message.contains("already in pdf format"));
    }

    #[test]
    fn test_unsupported_pairs_are_rejected() {
        // docx cannot become an image
        let err = Conversion::select("report.docx", Format::Png).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConversion);

        // pdf cannot become an image either
        let err = Conversion::select("paper.pdf", Format::Jpeg).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn test_unknown_extension_and_missing_extension() {
        let err = Conversion::select("data.xyz", Format::Pdf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConversion);

        let err = Conversion::select("noext", Format::Pdf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_output_path_never_collides_with_input() {
        let dir = Path::new("/tmp/req");
        assert_eq!(
            output_path(dir, Format::Jpeg),
            Path::new("/tmp/req/output.jpg")
        );
    }
}
