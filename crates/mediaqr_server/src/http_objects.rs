//! Request and response shapes for the HTTP API.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use mediaqr_core::{CanonicalKey, MediaInfo, MediaRecord};
use mediaqr_error::{MediaQrError, MediaQrErrorKind, ValidationError};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status_code: StatusCode,
    message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Response status.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Multipart decoding failures carry their own status (413 past the
    /// body limit, 400 otherwise).
    pub fn from_multipart(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<MediaQrError> for ApiError {
    fn from(err: MediaQrError) -> Self {
        match err.kind() {
            MediaQrErrorKind::Validation(e) if e.is_too_large() => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, e.kind.to_string())
            }
            MediaQrErrorKind::Validation(e) => Self::new(StatusCode::BAD_REQUEST, e.kind.to_string()),
            MediaQrErrorKind::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Media not found"),
            MediaQrErrorKind::Allocation(e) => {
                tracing::error!(error = %e, "Allocation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.kind.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        MediaQrError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            tracing::error!("API Error: {} - {}", self.status_code, self.message);
        } else {
            tracing::debug!("API Error: {} - {}", self.status_code, self.message);
        }
        (self.status_code, Json(ErrorBody { detail: self.message })).into_response()
    }
}

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub detail: String,
}

/// Successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Canonical key
    pub id: CanonicalKey,
    /// Short code
    pub short_id: String,
    /// Client-side file name
    pub filename: Option<String>,
    /// Declared MIME type
    pub content_type: String,
    /// Payload size in bytes
    pub size: u64,
}

impl From<&MediaRecord> for UploadResponse {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: *record.canonical_key(),
            short_id: record.short_code().as_str().to_string(),
            filename: record.filename().clone(),
            content_type: record.content_type().clone(),
            size: *record.size(),
        }
    }
}

/// Record metadata, without the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfoResponse {
    /// Canonical key
    pub id: CanonicalKey,
    /// Short code
    pub short_id: String,
    /// Client-side file name
    pub filename: Option<String>,
    /// Declared MIME type
    pub content_type: String,
    /// Payload size in bytes
    pub size: u64,
    /// Content deliveries so far
    pub access_count: u64,
    /// Upload time
    pub created_at: DateTime<Utc>,
}

impl From<MediaInfo> for MediaInfoResponse {
    fn from(info: MediaInfo) -> Self {
        Self {
            id: *info.canonical_key(),
            short_id: info.short_code().as_str().to_string(),
            filename: info.filename().clone(),
            content_type: info.content_type().clone(),
            size: *info.size(),
            access_count: *info.access_count(),
            created_at: *info.created_at(),
        }
    }
}

/// Confirmation of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation text
    pub message: String,
    /// Canonical key of the removed record
    pub id: CanonicalKey,
}

/// Confirmation of a full wipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResponse {
    /// Confirmation text
    pub message: String,
    /// Records removed
    pub count: u64,
}

/// Liveness probe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
}

/// Service banner served at `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Service name
    pub message: String,
    /// Crate version
    pub version: String,
    /// Entry points
    pub endpoints: IndexEndpoints,
}

/// Entry points listed in the banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEndpoints {
    /// Upload route
    pub upload: String,
    /// Media route template
    pub media: String,
    /// Short-link route template
    pub short_link: String,
}
