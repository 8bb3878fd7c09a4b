use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{created, ok};
use crate::service::TopicService;
use crate::state::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let topics = TopicService::list(state.store()).await?;
    ok("topics", topics)
}

pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let topic = TopicService::create(state.store(), body).await?;
    created("newTopic", topic)
}
