//! Metrics middleware for status routes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::metrics::HTTP_REQUESTS_TOTAL;

/// Count every request by method, path and status.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    // Keep label cardinality bounded for unknown paths.
    let path = if status == StatusCode::NOT_FOUND {
        "unmatched".to_string()
    } else {
        path
    };
    let status = status.as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}
