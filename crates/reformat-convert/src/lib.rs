//! # reformat-convert
//!
//! Format registry, conversion options, and converter dispatch for the
//! Reformat service. The actual codec work (pixel encoding, PDF writing,
//! DOCX serialization, PDF text extraction) is delegated to external
//! capabilities; this crate selects and drives them.

pub mod converters;
pub mod dispatch;
pub mod formats;
pub mod options;
pub mod pdftotext;

pub use dispatch::Conversion;
pub use formats::{content_type_for, supported_formats, Format, SourceClass};
pub use options::{ConvertOptions, OptionsOverride};
