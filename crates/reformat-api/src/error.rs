//! Maps domain `AppError` to HTTP responses.
//!
//! Client-caused failures surface as 4xx with the message verbatim;
//! server-side failures as 5xx. Error bodies are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use reformat_core::error::{AppError, ErrorKind};

/// Wrapper implementing `IntoResponse` for the shared error type.
///
/// Handlers return `Result<_, ApiError>`; the `From<AppError>` impl lets
/// `?` propagate domain errors straight to the response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation | ErrorKind::UnsupportedConversion => StatusCode::BAD_REQUEST,
            ErrorKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Storage
            | ErrorKind::Conversion
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, err.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        let resp = ApiError(AppError::validation("bad")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(AppError::unsupported_conversion("pair")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_errors_map_to_500_and_deadline_to_504() {
        let resp = ApiError(AppError::storage("disk")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = ApiError(AppError::deadline_exceeded("slow")).into_response();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
