//! Response timing middleware.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

/// Header carrying the server-side processing time.
pub const RESPONSE_TIME_HEADER: &str = "X-Response-Time";

/// Stamps every response with its processing time and writes an access log
/// line. Installed outermost so rejected requests are stamped too.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed = start.elapsed();
    if let Ok(value) = HeaderValue::from_str(&format!("{}ms", elapsed.as_millis())) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }

    info!(
        target: "http",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    response
}
