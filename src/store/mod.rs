//! Persistence boundary. Handlers and services only see [`NewsStore`]; the binary
//! decides which implementation backs it.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{
    Article, ArticleDetail, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User,
};
use crate::service::{ArticleQuery, Page};
use async_trait::async_trait;
use std::sync::Arc;

pub type SharedStore = Arc<dyn NewsStore>;

/// Row-level access to topics, articles, comments and users.
///
/// Writes that reference a missing topic, user or article, or that duplicate a
/// topic slug, fail with a client error (`AppError::BadRequest`, or a store
/// error that maps to 400).
#[async_trait]
pub trait NewsStore: Send + Sync + 'static {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError>;

    /// Case-insensitive slug match.
    async fn topic_exists(&self, slug: &str) -> Result<bool, AppError>;

    async fn insert_topic(&self, topic: &NewTopic) -> Result<Topic, AppError>;

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, AppError>;

    async fn article_by_id(&self, article_id: i32) -> Result<Option<ArticleDetail>, AppError>;

    async fn insert_article(&self, article: &NewArticle) -> Result<Article, AppError>;

    /// `votes = votes + inc`; `None` when the article does not exist.
    async fn increment_article_votes(
        &self,
        article_id: i32,
        inc: i32,
    ) -> Result<Option<Article>, AppError>;

    /// Deletes the article's comments and then the article, all or nothing.
    /// Returns false when there was no such article.
    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError>;

    /// Newest first.
    async fn comments_for_article(
        &self,
        article_id: i32,
        page: Option<Page>,
    ) -> Result<Vec<Comment>, AppError>;

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError>;

    async fn comment_by_id(&self, comment_id: i32) -> Result<Option<Comment>, AppError>;

    /// `votes = votes + inc`; `None` when the comment does not exist.
    async fn increment_comment_votes(
        &self,
        comment_id: i32,
        inc: i32,
    ) -> Result<Option<Comment>, AppError>;

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Case-insensitive username match.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
