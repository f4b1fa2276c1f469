use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Method, StatusCode, Uri};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;
use tracing::field::Empty;

use crate::api::rest::error::ApiError;
use crate::config::{CorsConfig, DirectoryConfig};

#[must_use]
pub fn api_version_header() -> HeaderName {
    HeaderName::from_static("x-api-version")
}

#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

const ANY: &str = "*";

/// Wrap the routed application in the HTTP middleware stack.
///
/// Request execution order (outermost -> innermost):
/// `SetRequestId -> PropagateRequestId -> Trace -> ApiVersion -> ErrorEnvelope -> Timeout -> BodyLimit -> CORS -> NormalizePath -> Router`
///
/// `Router::layer` makes the last added layer the outermost one, so layers
/// are added innermost first below.
///
/// # Errors
/// Returns an error if the API version or a CORS entry is not a valid header
/// value.
pub fn apply_middleware_stack(router: Router, config: &DirectoryConfig) -> Result<Router> {
    // 8) Path normalization must run before routing, so the routed app
    //    becomes the fallback service of a router that carries the layer
    let mut router = Router::new()
        .fallback_service(router)
        .layer(from_fn(normalize_path));

    // 7) CORS; answers every OPTIONS request itself
    router = router.layer(build_cors_layer(&config.cors)?);

    // 6) Body limit
    router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(config.body_limit_bytes));

    // 5) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(config.request_timeout_secs),
    ));

    // 4) Error envelope for rejections produced by the layers above
    router = router.layer(from_fn(error_envelope));

    // 3) API version header, outer to CORS so preflight answers carry it
    let version = HeaderValue::from_str(&config.api_version)
        .with_context(|| format!("invalid api_version '{}'", config.api_version))?;
    router = router.layer(from_fn(move |req: Request, next: Next| {
        let version = version.clone();
        async move {
            let mut res = next.run(req).await;
            res.headers_mut().insert(api_version_header(), version);
            res
        }
    }));

    // 2) Trace
    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(request_id_header())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    module = "directory",
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    );

    // 1) Request ID: generate x-request-id if missing, then echo it on the response
    let x_request_id = request_id_header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    Ok(router)
}

/// Drop empty path segments: `//v1//permissions/` routes as `/v1/permissions`.
async fn normalize_path(mut req: Request, next: Next) -> Response {
    if let Some(uri) = collapse_empty_segments(req.uri()) {
        debug!(from = %req.uri().path(), to = %uri.path(), "Normalized request path");
        *req.uri_mut() = uri;
    }
    next.run(req).await
}

fn collapse_empty_segments(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let normalized = format!("/{}", segments.join("/"));
    if normalized == path {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{normalized}?{query}"),
        None => normalized,
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Rewrite non-JSON failures (body limit, timeout) into the `{"error": ..}`
/// envelope. Other headers of the original response are kept.
async fn error_envelope(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let message = match status {
        StatusCode::PAYLOAD_TOO_LARGE => "Payload too large",
        StatusCode::GATEWAY_TIMEOUT => "Request timed out",
        _ => status.canonical_reason().unwrap_or("Request failed"),
    };
    debug!(status = status.as_u16(), error = message, "Wrapping middleware rejection");

    let (mut parts, _) = res.into_parts();
    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);
    let (envelope, body) = ApiError::new(status, message).into_response().into_parts();
    parts.headers.extend(envelope.headers);
    Response::from_parts(parts, body)
}

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Build the CORS layer. A `"*"` entry in origins or headers means any.
///
/// # Errors
/// Returns an error if an origin, method or header name cannot be parsed.
pub fn build_cors_layer(cfg: &CorsConfig) -> Result<CorsLayer> {
    let origins = if cfg.allowed_origins.iter().any(|o| o == ANY) {
        AllowOrigin::any()
    } else {
        let list = cfg
            .allowed_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'")))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(list)
    };

    let methods = cfg
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.as_bytes()).with_context(|| format!("invalid CORS method '{m}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let headers = if cfg.allowed_headers.iter().any(|h| h == ANY) {
        AllowHeaders::any()
    } else {
        let list = cfg
            .allowed_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.as_bytes())
                    .with_context(|| format!("invalid CORS header '{h}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowHeaders::list(list)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(headers)
        .max_age(Duration::from_secs(cfg.max_age_seconds)))
}
