//! Response headers for API answers and the served UI bundle.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Adds basic hardening headers and a caching policy to every response.
///
/// - JSON answers are never cached, so a refetch after a mutation always sees the
///   current list
/// - The UI bundle (JS, WASM, CSS) must be revalidated, since it changes with every
///   rebuild of the web UI
pub async fn response_headers(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();

    headers.insert(HeaderName::from_static("x-content-type-options"), HeaderValue::from_static("nosniff"));
    headers.insert(HeaderName::from_static("x-frame-options"), HeaderValue::from_static("SAMEORIGIN"));

    let content_type = headers.get(CONTENT_TYPE).and_then(|ct| ct.to_str().ok()).map(str::to_string);
    if let Some(s) = content_type.as_deref() {
        if s.starts_with("application/json") {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        } else if s.starts_with("application/wasm")
            || s.starts_with("application/javascript")
            || s.starts_with("text/javascript")
            || s.starts_with("text/css")
        {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }
    }

    res
}
