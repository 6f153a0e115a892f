//! Conversion pipeline configuration.

use serde::{Deserialize, Serialize};

/// Settings for the upload/convert/respond pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
    /// Deadline for one complete pipeline run, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Name or path of the `pdftotext` binary used for PDF text extraction.
    #[serde(default = "default_pdftotext_bin")]
    pub pdftotext_bin: String,
    /// Root directory for request-scoped staging directories.
    /// Empty means the system temp directory.
    #[serde(default)]
    pub temp_dir: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload_size(),
            request_timeout_seconds: default_request_timeout(),
            pdftotext_bin: default_pdftotext_bin(),
            temp_dir: String::new(),
        }
    }
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pdftotext_bin() -> String {
    "pdftotext".to_string()
}
