//! Plain-text extraction from PDF via the external `pdftotext` binary.
//!
//! The binary is consumed as a black-box capability; its stdout is the
//! extracted text (`pdftotext <input> -`).

use std::path::Path;

use reformat_core::{AppError, AppResult};

/// Run `pdftotext` against `input` and return the extracted text.
pub async fn extract_text(bin: &str, input: &Path) -> AppResult<String> {
    let output = tokio::process::Command::new(bin)
        .arg(input)
        .arg("-")
        .output()
        .await
        .map_err(|e| {
            AppError::conversion(format!("failed to spawn '{bin}': {e}"))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::conversion(format!(
            "pdftotext failed ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
