//! `GET /api` and the catch-all for unmatched paths.

use crate::error::AppError;
use crate::response::ok;
use crate::service::load_catalog;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn endpoints(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = load_catalog(&state.endpoints_path).await?;
    ok("endpoints", catalog)
}

pub async fn fallback() -> AppError {
    AppError::InvalidPath
}
