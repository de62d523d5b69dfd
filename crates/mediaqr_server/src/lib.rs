//! HTTP server for the mediaqr media store.
//!
//! Upload audio, video and images; get back a canonical key and a short
//! code; fetch the bytes later through either.
//!
//! | Method | Path | |
//! |---|---|---|
//! | `POST` | `/api/v1/upload` | multipart field `file` |
//! | `GET` | `/q/:token` | short code or canonical key, counts the access |
//! | `GET` | `/api/v1/media/:canonical_key` | counts the access, long-lived cache headers |
//! | `GET` | `/api/v1/media/:token/info` | metadata, does not count |
//! | `DELETE` | `/api/v1/media/:token` | hard delete |
//! | `GET` | `/api/v1/stats` | counts and sizes |
//! | `GET` | `/api/v1/storage` | usage against capacity |
//! | `DELETE` | `/api/v1/cleanup/all` | only when `enable_cleanup` is set |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod http_objects;
mod observability;
mod routes;
mod server;

pub use config::{
    MediaQrConfig, MediaQrConfigBuilder, MediaQrConfigBuilderError, SHORT_CODE_LENGTHS,
    StorageBackend,
};
pub use http_objects::{
    ApiError, CleanupResponse, DeleteResponse, ErrorBody, HealthResponse, IndexEndpoints,
    IndexResponse, MediaInfoResponse, UploadResponse,
};
pub use observability::init_tracing;
pub use routes::{RouteState, create_routes};
pub use server::{open_store, run};
