//! Comment handlers, both nested under an article and addressed by comment id.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{created, ok};
use crate::service::{CommentService, PageParams};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list_for_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let comments = CommentService::list_for_article(state.store(), &article_id, &params).await?;
    ok("comments", comments)
}

pub async fn create_for_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentService::create(state.store(), &article_id, body).await?;
    created("new_comment", comment)
}

pub async fn update(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentService::update_votes(state.store(), &comment_id, body).await?;
    ok("updatedComment", comment)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CommentService::delete(state.store(), &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
