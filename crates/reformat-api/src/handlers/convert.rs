//! The upload/convert/respond pipeline.
//!
//! Linear state machine: receive → validate → stage → convert → respond.
//! Staging uses a per-request temp directory whose removal is guaranteed
//! by RAII on every exit path; that cleanup guarantee is the most
//! important correctness property here.

use std::path::Path;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use serde::Deserialize;
use tempfile::TempDir;

use reformat_core::{AppError, AppResult};
use reformat_convert::{dispatch, Conversion, ConvertOptions, Format, OptionsOverride};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `POST /api/convert`.
///
/// The source format is always inferred from the uploaded filename's
/// extension; `from` is an optional assertion that must match it.
#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    /// Requested target format.
    pub to: Option<String>,
    /// Optional declared source format.
    pub from: Option<String>,
    /// JPEG quality override (0-100).
    pub quality: Option<u32>,
    /// GIF palette size override (2-256).
    pub colors: Option<u32>,
    /// Max image width override, in millimeters.
    pub width: Option<f64>,
    /// PDF font family override (helvetica/times/courier).
    pub font: Option<String>,
}

impl ConvertParams {
    fn overrides(&self) -> OptionsOverride {
        OptionsOverride {
            jpeg_quality: self.quality,
            gif_colors: self.colors,
            max_image_width: self.width,
            font_name: self.font.clone(),
            ..Default::default()
        }
    }
}

/// POST /api/convert?to=<format> — multipart body with a `file` field.
pub async fn convert(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let max_size = state.config.conversion.max_upload_size_bytes;

    // Receive: reject an oversized upload from its declared size before
    // the body is buffered anywhere.
    if let Some(declared) = declared_content_length(&headers) {
        if declared > max_size {
            return Err(AppError::validation(format!(
                "upload exceeds maximum allowed size of {max_size} bytes"
            ))
            .into());
        }
    }

    // Validate the target before touching the body.
    let target = parse_target(params.to.as_deref())?;

    let upload = read_upload(multipart, max_size).await?;
    tracing::info!(
        filename = %upload.filename,
        size = upload.data.len(),
        to = %target,
        "Received conversion upload"
    );

    // The optional `from` parameter is an assertion on the filename.
    if let Some(from) = params.from.as_deref().filter(|f| !f.is_empty()) {
        assert_source_matches(from, &upload.filename)?;
    }

    let conversion = Conversion::select(&upload.filename, target)?;

    let mut options = ConvertOptions::default();
    options.apply(&params.overrides());

    // Stage + convert under the per-request deadline. The TempDir lives in
    // this scope, so the staging directory is removed whether we succeed,
    // fail, or time out.
    let staging = create_staging_dir(&state.config.conversion.temp_dir)?;
    let input = staging.path().join(staging_filename(&upload.filename));
    let output = dispatch::output_path(staging.path(), target);

    let deadline = Duration::from_secs(state.config.conversion.request_timeout_seconds);
    let pipeline = async {
        tokio::fs::write(&input, &upload.data).await?;
        conversion
            .run(&input, &output, &options, &state.config.conversion.pdftotext_bin)
            .await?;
        Ok::<Bytes, AppError>(tokio::fs::read(&output).await?.into())
    };

    let converted = tokio::time::timeout(deadline, pipeline)
        .await
        .map_err(|_| {
            AppError::deadline_exceeded(format!(
                "conversion did not complete within {}s",
                deadline.as_secs()
            ))
        })??;

    let filename = download_filename(&upload.filename, target);
    tracing::info!(
        conversion = conversion.name(),
        output_size = converted.len(),
        filename = %filename,
        "Conversion complete"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, target.mime_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, converted.len())
        .body(Body::from(converted))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

struct Upload {
    filename: String,
    data: Bytes,
}

/// Pull the `file` field out of the multipart form, enforcing the size cap
/// on the buffered bytes before anything reaches disk.
async fn read_upload(mut multipart: Multipart, max_size: u64) -> AppResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::validation("uploaded file has no filename"))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("failed to read upload: {e}")))?;

        if data.len() as u64 > max_size {
            return Err(AppError::validation(format!(
                "upload exceeds maximum allowed size of {max_size} bytes"
            )));
        }

        return Ok(Upload { filename, data });
    }

    Err(AppError::validation("missing 'file' field in multipart form"))
}

fn parse_target(to: Option<&str>) -> AppResult<Format> {
    let to = to
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Missing 'to' query parameter"))?;
    let format = Format::parse(to)
        .ok_or_else(|| AppError::validation(format!("Invalid 'to' format: {to}")))?;
    if !format.is_target() {
        return Err(AppError::validation(format!(
            "format '{to}' is not a valid conversion target"
        )));
    }
    Ok(format)
}

fn assert_source_matches(from: &str, filename: &str) -> AppResult<()> {
    let declared = Format::parse(from)
        .ok_or_else(|| AppError::validation(format!("Invalid 'from' format: {from}")))?;
    let actual = reformat_convert::formats::extension_of(filename)
        .and_then(|ext| Format::parse(&ext));
    if actual != Some(declared) {
        return Err(AppError::validation(format!(
            "declared source format '{from}' does not match uploaded file '{filename}'"
        )));
    }
    Ok(())
}

/// Staged input name: reserved `input` stem, original extension. Keeps an
/// upload literally named `output.<ext>` from sharing a path with the
/// conversion artifact.
fn staging_filename(original: &str) -> String {
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("input.{ext}"),
        None => "input".to_string(),
    }
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Per-request staging directory, uniquely named to stay isolated under
/// concurrent requests with identical original filenames.
fn create_staging_dir(root: &str) -> AppResult<TempDir> {
    let builder = {
        let mut b = tempfile::Builder::new();
        b.prefix("reformat-");
        b
    };
    let dir = if root.is_empty() {
        builder.tempdir()
    } else {
        std::fs::create_dir_all(root)?;
        builder.tempdir_in(root)
    };
    dir.map_err(|e| AppError::storage(format!("failed to create staging directory: {e}")))
}

/// Suggested download name: original stem with the new extension.
fn download_filename(original: &str, target: Format) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("converted");
    format!("{stem}.{}", target.extension())
}
