//! Article handlers: list, create, read, vote update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{created, ok};
use crate::service::{ArticleListParams, ArticleService};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ArticleListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let articles = ArticleService::list(state.store(), &params).await?;
    ok("articles", articles)
}

pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::create(state.store(), body).await?;
    created("newArticle", article)
}

pub async fn read(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::get(state.store(), &article_id).await?;
    ok("article", article)
}

pub async fn update(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::update_votes(state.store(), &article_id, body).await?;
    ok("updated_article", article)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ArticleService::delete(state.store(), &article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
