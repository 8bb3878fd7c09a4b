//! The static endpoint catalog served at `GET /api`.

use crate::error::AppError;
use serde_json::Value;
use std::path::Path;

/// Read and parse the catalog. It is read on every call so edits show up without a restart.
pub async fn load_catalog(path: &Path) -> Result<Value, AppError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Internal(format!("read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::Internal(format!("parse {}: {}", path.display(), e)))
}
