use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of one API call; handlers log it with upstream failures.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tags every request with an id (the caller's `x-request-id`, or a fresh
/// UUID v4), runs the handler inside a span carrying it, and echoes it on
/// the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(given) if !given.trim().is_empty() => given.trim().to_string(),
        _ => Uuid::new_v4().to_string(),
    };
    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("api", request_id = %id, path = %req.uri().path());
    let mut response = next.run(req).instrument(span).await;

    match HeaderValue::from_str(&id) {
        Ok(value) => {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(_) => tracing::debug!(request_id = %id, "request id is not a valid header value"),
    }
    response
}
