//! Response envelopes. Every success body is a single-key object naming its payload,
//! e.g. `{"articles": [...]}` or `{"newTopic": {...}}`.

use crate::error::AppError;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

pub fn keyed<T: Serialize>(
    status: StatusCode,
    key: &'static str,
    data: T,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let value = serde_json::to_value(data)
        .map_err(|e| AppError::Internal(format!("serialize {}: {}", key, e)))?;
    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Ok((status, Json(Value::Object(body))))
}

pub fn ok<T: Serialize>(key: &'static str, data: T) -> Result<(StatusCode, Json<Value>), AppError> {
    keyed(StatusCode::OK, key, data)
}

pub fn created<T: Serialize>(
    key: &'static str,
    data: T,
) -> Result<(StatusCode, Json<Value>), AppError> {
    keyed(StatusCode::CREATED, key, data)
}
