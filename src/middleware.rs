//! Rewrites error responses produced outside the handlers into the `{"msg"}` body.

use crate::error::AppError;
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

fn has_json_body(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

/// A known path with an unsupported method is answered like an unknown path.
/// The body limit's plain-text 413 gets the JSON error body.
pub async fn json_error_bodies(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => AppError::InvalidPath.into_response(),
        StatusCode::PAYLOAD_TOO_LARGE if !has_json_body(&response) => {
            AppError::PayloadTooLarge.into_response()
        }
        _ => response,
    }
}
