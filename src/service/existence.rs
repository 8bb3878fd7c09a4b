//! Referential existence checks that turn a missing row into a typed not-found.

use crate::error::{AppError, Resource};
use crate::store::NewsStore;

pub async fn ensure_topic_exists(store: &dyn NewsStore, slug: &str) -> Result<(), AppError> {
    if store.topic_exists(slug).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(Resource::Topic))
    }
}

pub async fn ensure_article_exists(store: &dyn NewsStore, article_id: i32) -> Result<(), AppError> {
    match store.article_by_id(article_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(Resource::Article)),
    }
}
