//! HTTP routes.

use crate::http_objects::{
    ApiError, CleanupResponse, DeleteResponse, HealthResponse, IndexEndpoints, IndexResponse,
    MediaInfoResponse, UploadResponse,
};
use crate::MediaQrConfig;
use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath, Multipart, Path, Request, State},
    http::{
        HeaderValue,
        header::{ACCEPT_RANGES, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::Response,
    routing::{delete, get, post},
};
use bytes::BytesMut;
use mediaqr_core::{MediaRecord, is_allowed_content_type};
use mediaqr_error::{ValidationError, ValidationErrorKind};
use mediaqr_service::{MediaService, StoreStats, Upload, UsageReport};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{instrument, warn};

/// Room above `max_file_size` for multipart framing before the body limit trips.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Shared handler state.
#[derive(Clone)]
pub struct RouteState {
    service: MediaService,
    config: Arc<MediaQrConfig>,
}

impl RouteState {
    /// State over a service and the configuration it was built from.
    pub fn new(service: MediaService, config: Arc<MediaQrConfig>) -> Self {
        Self { service, config }
    }

    /// The media service.
    pub fn service(&self) -> &MediaService {
        &self.service
    }
}

/// Build the full router: API under `/api/v1`, short links at `/q/:token`.
pub fn create_routes(state: RouteState) -> Router {
    let mut api = Router::new()
        .route("/upload", post(upload))
        .route("/media/:token", get(get_media).delete(delete_media))
        .route("/media/:token/info", get(media_info))
        .route("/stats", get(stats))
        .route("/storage", get(storage));
    if *state.config.enable_cleanup() {
        api = api.route("/cleanup/all", delete(cleanup_all));
    }

    let body_limit = usize::try_from(state.config.max_file_size().saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/q/:token", get(short_link))
        .nest("/api/v1", api)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let method = req.method();
                let uri = req.uri();

                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|matched_path| matched_path.as_str());

                tracing::debug_span!("request", %method, %uri, matched_path)
            }),
        )
        .layer(cors_layer(state.config.allowed_origins()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Credentials are allowed, so methods and headers mirror the request rather
/// than using a wildcard.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Media to QR API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: IndexEndpoints {
            upload: "/api/v1/upload".to_string(),
            media: "/api/v1/media/{uuid}".to_string(),
            short_link: "/q/{short_id}".to_string(),
        },
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Accept the `file` field of a multipart form.
///
/// The type is checked before the body is read, and the running size is
/// checked per chunk so oversized uploads stop early.
#[instrument(skip_all)]
async fn upload(
    State(state): State<RouteState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let policy = *state.service.upload_policy();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        if !is_allowed_content_type(&content_type) {
            return Err(ValidationError::new(ValidationErrorKind::DisallowedContentType(
                content_type,
            ))
            .into());
        }
        let filename = field.file_name().map(str::to_string);

        let mut payload = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(ApiError::from_multipart)? {
            policy.check_size((payload.len() + chunk.len()) as u64)?;
            payload.extend_from_slice(&chunk);
        }

        let record = state
            .service
            .upload(Upload::new(payload.freeze(), content_type, filename))
            .await?;
        return Ok(Json(UploadResponse::from(&record)));
    }

    Err(ValidationError::new(ValidationErrorKind::MalformedUpload(
        "missing 'file' field".to_string(),
    ))
    .into())
}

async fn short_link(
    State(state): State<RouteState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.service.retrieve(&token).await?;
    Ok(media_response(&record, false))
}

async fn get_media(
    State(state): State<RouteState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.service.retrieve_by_key(&token).await?;
    Ok(media_response(&record, true))
}

async fn media_info(
    State(state): State<RouteState>,
    Path(token): Path<String>,
) -> Result<Json<MediaInfoResponse>, ApiError> {
    let info = state.service.info(&token).await?;
    Ok(Json(info.into()))
}

async fn delete_media(
    State(state): State<RouteState>,
    Path(token): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = state.service.delete(&token).await?;
    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
        id,
    }))
}

async fn stats(State(state): State<RouteState>) -> Result<Json<StoreStats>, ApiError> {
    Ok(Json(state.service.stats().await?))
}

async fn storage(State(state): State<RouteState>) -> Result<Json<UsageReport>, ApiError> {
    Ok(Json(state.service.usage().await?))
}

async fn cleanup_all(State(state): State<RouteState>) -> Result<Json<CleanupResponse>, ApiError> {
    let count = state.service.clear().await?;
    Ok(Json(CleanupResponse {
        message: format!("Deleted {} files", count),
        count,
    }))
}

/// Payload bytes with their declared type, served inline.
///
/// `cacheable` adds the long-lived caching headers used on canonical-key URLs.
fn media_response(record: &MediaRecord, cacheable: bool) -> Response {
    let mut response = Response::new(Body::from(record.payload().clone()));
    let headers = response.headers_mut();

    let content_type = HeaderValue::from_str(record.content_type())
        .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));
    headers.insert(CONTENT_TYPE, content_type);

    let filename = record
        .filename()
        .as_deref()
        .unwrap_or_else(|| record.short_code().as_str());
    let disposition = HeaderValue::from_str(&content_disposition(filename))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"));
    headers.insert(CONTENT_DISPOSITION, disposition);

    if cacheable {
        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000"),
        );
    }
    response
}

/// `inline` disposition naming the file. Names that are not plain printable
/// ASCII get an ASCII stand-in plus an RFC 5987 `filename*` carrying the
/// UTF-8 original.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();
    if fallback == filename {
        format!("inline; filename=\"{}\"", fallback)
    } else {
        format!(
            "inline; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}
