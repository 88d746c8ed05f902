//! Custom error types for assay.

use http::StatusCode;
use std::fmt::Display;

/// Failure while pretty-printing a value.
///
/// Only hand-written `Serialize` impls can produce these; derived impls and
/// the standard containers never do.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("{message}")]
    Custom { message: String },

    #[error("map value serialized before its key")]
    ValueWithoutKey,
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartError {
    #[error("Invalid multipart boundary: {boundary:?}")]
    InvalidBoundary { boundary: String },

    #[error("Content of part {name:?} contains the boundary delimiter")]
    BoundaryInContent { name: String },
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Invalid request: {0}")]
    Request(#[from] http::Error),

    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body is not UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("Expected status {expected}, got {actual}; body: {body}")]
    StatusMismatch {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AssayError {
    #[error(transparent)]
    Print(#[from] PrintError),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Http(#[from] HttpError),
}

impl HttpError {
    pub fn status_mismatch(expected: StatusCode, actual: StatusCode, body: &[u8]) -> Self {
        Self::StatusMismatch {
            expected,
            actual,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

impl serde::ser::Error for PrintError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom {
            message: msg.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    #[test]
    fn test_print_error_custom() {
        let err = PrintError::custom("refusing to serialize");
        assert_eq!(err.to_string(), "refusing to serialize");
    }

    #[test]
    fn test_status_mismatch_display() {
        let err =
            HttpError::status_mismatch(StatusCode::OK, StatusCode::NOT_FOUND, b"no such page");
        assert_eq!(
            err.to_string(),
            "Expected status 200 OK, got 404 Not Found; body: no such page"
        );
    }

    #[test]
    fn test_assay_error_from_http_error() {
        let mismatch = HttpError::status_mismatch(StatusCode::OK, StatusCode::OK, b"");
        let err: AssayError = mismatch.into();
        assert!(matches!(err, AssayError::Http(_)));
    }

    #[test]
    fn test_multipart_error_display() {
        let err = MultipartError::InvalidBoundary {
            boundary: "a b ".to_string(),
        };
        assert!(err.to_string().contains("Invalid multipart boundary"));
    }
}
