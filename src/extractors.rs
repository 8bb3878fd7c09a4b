//! Request body extraction for JSON endpoints.

use crate::error::AppError;
use crate::service::body_object;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
};
use serde_json::{Map, Value};

/// A JSON request body whose problems are reported only when the handler asks
/// for it, so path ids and existence checks are answered first.
///
/// A missing or blank body reads as `{}`. A body that is not JSON, or is sent
/// without a JSON content type, is a bad request once inspected. Only an
/// oversized body rejects the request up front.
#[derive(Debug)]
pub struct JsonBody(pub Result<Value, AppError>);

impl JsonBody {
    pub fn into_object(self) -> Result<Map<String, Value>, AppError> {
        body_object(self.0?)
    }
}

impl From<Value> for JsonBody {
    fn from(value: Value) -> Self {
        JsonBody(Ok(value))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn parse_body(is_json: bool, bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    if !is_json {
        tracing::debug!("request body without a JSON content type");
        return Err(AppError::BadRequest);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "malformed JSON body");
        AppError::BadRequest
    })
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(JsonBody(parse_body(is_json, &bytes))),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => {
                tracing::debug!(error = %rejection, "failed to read request body");
                Ok(JsonBody(Err(AppError::BadRequest)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        h
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type(&headers("application/json")));
        assert!(is_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json_content_type(&headers("application/merge-patch+json")));
        assert!(!is_json_content_type(&headers("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn blank_bodies_read_as_empty_objects() {
        assert_eq!(parse_body(false, b"").unwrap(), json!({}));
        assert_eq!(parse_body(true, b" \n").unwrap(), json!({}));
    }

    #[test]
    fn content_errors_surface_on_inspection() {
        assert!(matches!(
            parse_body(true, b"{\"inc_votes\": "),
            Err(AppError::BadRequest)
        ));
        assert!(matches!(
            parse_body(false, b"inc_votes=1"),
            Err(AppError::BadRequest)
        ));
        let body = JsonBody(parse_body(true, b"[1]"));
        assert!(matches!(body.into_object(), Err(AppError::BadRequest)));
        let body = JsonBody::from(json!({"inc_votes": 1}));
        assert_eq!(body.into_object().unwrap()["inc_votes"], 1);
    }
}
