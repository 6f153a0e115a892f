//! Format registry: token normalization, extension aliases, MIME types,
//! and source/target capability flags.
//!
//! The registry is a static table, immutable for the process lifetime,
//! and safe for unsynchronized concurrent reads.

use serde::{Deserialize, Serialize};

/// A file format the service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// PDF document
    Pdf,
    /// Word document (OOXML)
    Docx,
    /// JPEG raster image
    Jpeg,
    /// PNG raster image
    Png,
    /// GIF raster image
    Gif,
    /// BMP raster image
    Bmp,
}

/// All formats, in the order they are presented to clients.
const ALL_FORMATS: [Format; 6] = [
    Format::Pdf,
    Format::Docx,
    Format::Jpeg,
    Format::Png,
    Format::Gif,
    Format::Bmp,
];

impl Format {
    /// Resolve a user-supplied token into a format.
    ///
    /// Tokens are normalized (lowercased, leading dot stripped) and matched
    /// against the canonical extension and its aliases.
    pub fn parse(token: &str) -> Option<Self> {
        match normalize(token).as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Canonical file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// All extensions recognized for this format.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Docx => &["docx"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Gif => &["gif"],
            Self::Bmp => &["bmp"],
        }
    }

    /// MIME type used for HTTP responses in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    /// Whether files in this format are accepted as upload sources.
    pub fn is_source(&self) -> bool {
        // Every registered format can appear as an upload.
        true
    }

    /// Whether this format can be requested as a conversion target.
    pub fn is_target(&self) -> bool {
        // BMP is decoded as a source but not offered as a target.
        !matches!(self, Self::Bmp)
    }

    /// Coarse classification used by converter dispatch.
    pub fn source_class(&self) -> SourceClass {
        match self {
            Self::Pdf => SourceClass::Pdf,
            Self::Docx => SourceClass::Docx,
            Self::Jpeg | Self::Png | Self::Gif | Self::Bmp => SourceClass::Image,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Coarse source-file classification for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceClass {
    /// Raster image (jpg/jpeg/png/gif/bmp)
    Image,
    /// PDF document
    Pdf,
    /// Word document
    Docx,
}

/// Descriptor served to clients listing one supported format.
#[derive(Debug, Clone, Serialize)]
pub struct FormatDescriptor {
    /// Canonical name.
    pub name: &'static str,
    /// Recognized file extensions.
    pub aliases: &'static [&'static str],
    /// MIME type for responses.
    pub content_type: &'static str,
    /// Valid as an upload source.
    pub source: bool,
    /// Valid as a conversion target.
    pub target: bool,
}

/// Ordered descriptors for every registered format.
pub fn supported_formats() -> Vec<FormatDescriptor> {
    ALL_FORMATS
        .iter()
        .map(|f| FormatDescriptor {
            name: f.extension(),
            aliases: f.aliases(),
            content_type: f.mime_type(),
            source: f.is_source(),
            target: f.is_target(),
        })
        .collect()
}

/// Resolve the response content type for a token.
///
/// Falls back to `application/octet-stream` for unrecognized tokens. This
/// is a safety fallback, not a validation gate; callers must check format
/// membership separately via [`Format::parse`].
pub fn content_type_for(token: &str) -> &'static str {
    Format::parse(token)
        .map(|f| f.mime_type())
        .unwrap_or("application/octet-stream")
}

/// Extract the (normalized) extension of a filename.
pub fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn normalize(token: &str) -> String {
    token.trim().trim_start_matches('.').to_ascii_lowercase()
}
