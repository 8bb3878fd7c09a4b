//! `/api` routes. Path segments are extracted as strings; handlers validate ids.

use crate::handlers::{api, articles, comments, topics, users};
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api::endpoints))
        .route("/api/topics", get(topics::list).post(topics::create))
        .route("/api/articles", get(articles::list).post(articles::create))
        .route(
            "/api/articles/:article_id",
            get(articles::read)
                .patch(articles::update)
                .delete(articles::delete),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(comments::list_for_article).post(comments::create_for_article),
        )
        .route(
            "/api/comments/:comment_id",
            patch(comments::update).delete(comments::delete),
        )
        .route("/api/users", get(users::list))
        .route("/api/users/:username", get(users::read))
        .with_state(state)
}
