//! Comments on an article, comment vote updates and deletes.

use crate::error::{AppError, Resource};
use crate::extractors::JsonBody;
use crate::models::{Comment, NewComment};
use crate::service::existence::ensure_article_exists;
use crate::service::validation::{parse_id, parse_inc_votes, required_str, PageParams};
use crate::store::NewsStore;

pub struct CommentService;

impl CommentService {
    /// Newest first. The article must exist; an article without comments yields an empty list.
    pub async fn list_for_article(
        store: &dyn NewsStore,
        article_id: &str,
        params: &PageParams,
    ) -> Result<Vec<Comment>, AppError> {
        let article_id = parse_id(article_id)?;
        let page = params.resolve()?;
        ensure_article_exists(store, article_id).await?;
        store.comments_for_article(article_id, page).await
    }

    pub async fn create(
        store: &dyn NewsStore,
        article_id: &str,
        body: JsonBody,
    ) -> Result<Comment, AppError> {
        let article_id = parse_id(article_id)?;
        ensure_article_exists(store, article_id).await?;
        let body = body.into_object()?;
        let new = NewComment {
            article_id,
            username: required_str(&body, "username")?,
            body: required_str(&body, "body")?,
        };
        let comment = store.insert_comment(&new).await?;
        tracing::info!(comment_id = comment.comment_id, article_id, "created comment");
        Ok(comment)
    }

    /// A zero increment reads the comment back without writing.
    pub async fn update_votes(
        store: &dyn NewsStore,
        id: &str,
        body: JsonBody,
    ) -> Result<Comment, AppError> {
        let comment_id = parse_id(id)?;
        let body = body.into_object()?;
        let inc = parse_inc_votes(&body)?;
        let updated = if inc == 0 {
            store.comment_by_id(comment_id).await?
        } else {
            store.increment_comment_votes(comment_id, inc).await?
        };
        updated.ok_or(AppError::NotFound(Resource::Comment))
    }

    pub async fn delete(store: &dyn NewsStore, id: &str) -> Result<(), AppError> {
        let comment_id = parse_id(id)?;
        if store.delete_comment(comment_id).await? {
            tracing::info!(comment_id, "deleted comment");
            Ok(())
        } else {
            Err(AppError::NotFound(Resource::Comment))
        }
    }
}
