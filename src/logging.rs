//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::routing::RECEIPT_SIZE_LIMIT;

/// The number of bytes of a text body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a text body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Multipart and binary bodies, e.g. receipt uploads and downloads, are only
/// logged by their length.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, RECEIPT_SIZE_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    tracing::info!(
        "Received request: {} {}\nbody: {}",
        parts.method,
        parts.uri,
        describe_body(&parts.headers, &body_bytes)
    );
    log_full_body("request", &parts.headers, &body_bytes);

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!(
        "Sending response: {}\nbody: {}",
        parts.status,
        describe_body(&parts.headers, &body_bytes)
    );
    log_full_body("response", &parts.headers, &body_bytes);

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_text_body(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return true;
    };

    content_type.starts_with("text/")
        || content_type.starts_with("application/json")
        || content_type.starts_with("application/x-www-form-urlencoded")
}

fn describe_body(headers: &HeaderMap, body: &Bytes) -> String {
    if !is_text_body(headers) {
        return format!("<{} bytes>", body.len());
    }

    let text = String::from_utf8_lossy(body);

    if text.len() > LOG_BODY_LENGTH_LIMIT {
        let end = (0..=LOG_BODY_LENGTH_LIMIT)
            .rev()
            .find(|&index| text.is_char_boundary(index))
            .unwrap_or(0);

        format!("{:?}...", &text[..end])
    } else {
        format!("{text:?}")
    }
}

fn log_full_body(label: &str, headers: &HeaderMap, body: &Bytes) {
    if is_text_body(headers) && body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full {label} body: {:?}", String::from_utf8_lossy(body));
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Bytes,
        http::{HeaderMap, HeaderValue, header::CONTENT_TYPE},
    };

    use super::{LOG_BODY_LENGTH_LIMIT, describe_body};

    fn headers_with_content_type(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn short_json_body_is_logged_verbatim() {
        let headers = headers_with_content_type("application/json");
        let body = Bytes::from_static(br#"{"id":1}"#);

        assert_eq!(describe_body(&headers, &body), r#""{\"id\":1}""#);
    }

    #[test]
    fn long_text_body_is_truncated() {
        let headers = headers_with_content_type("text/plain");
        let body = Bytes::from("a".repeat(LOG_BODY_LENGTH_LIMIT * 2));

        let description = describe_body(&headers, &body);

        assert!(description.ends_with("..."));
        assert!(description.len() < LOG_BODY_LENGTH_LIMIT * 2);
    }

    #[test]
    fn multipart_body_is_summarised() {
        let headers = headers_with_content_type("multipart/form-data; boundary=abc");
        let body = Bytes::from_static(b"--abc\r\n\xff\xfe--abc--");

        assert_eq!(describe_body(&headers, &body), format!("<{} bytes>", body.len()));
    }

    #[test]
    fn binary_body_is_summarised() {
        let headers = headers_with_content_type("image/png");
        let body = Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]);

        assert_eq!(describe_body(&headers, &body), "<4 bytes>");
    }
}
