//! The individual conversion capabilities behind [`crate::Conversion`].
//!
//! Each module exposes a synchronous `convert` function; dispatch runs
//! them on the blocking pool.

pub mod docx_pdf;
pub mod image_docx;
pub mod image_image;
pub mod image_pdf;
pub mod pdf_docx;

/// A4 portrait page size in millimeters, used by the PDF-producing
/// capabilities.
pub(crate) const PAGE_WIDTH_MM: f64 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f64 = 297.0;
