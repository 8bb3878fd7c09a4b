//! PostgreSQL-backed store.

use crate::error::AppError;
use crate::models::{
    Article, ArticleDetail, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User,
};
use crate::service::{ArticleQuery, Page};
use crate::sql::{
    bind_params, select_article_by_id, select_articles, select_comments_for_article, QueryBuf,
    COMMENT_COLUMNS,
};
use crate::store::NewsStore;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

const ARTICLE_RETURNING: &str =
    "article_id, title, topic, author, body, created_at, votes, article_img_url";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<O>(&self, q: &QueryBuf) -> Result<Vec<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<O>(&self, q: &QueryBuf) -> Result<Option<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl NewsStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        let topics = sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics ORDER BY slug")
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM topics WHERE LOWER(slug) = LOWER($1))")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert_topic(&self, topic: &NewTopic) -> Result<Topic, AppError> {
        let row = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (slug, description) VALUES ($1, $2) RETURNING slug, description",
        )
        .bind(&topic.slug)
        .bind(&topic.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, AppError> {
        self.fetch_all(&select_articles(query)).await
    }

    async fn article_by_id(&self, article_id: i32) -> Result<Option<ArticleDetail>, AppError> {
        self.fetch_optional(&select_article_by_id(article_id)).await
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<Article, AppError> {
        let sql = format!(
            "INSERT INTO articles (title, topic, author, body, article_img_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ARTICLE_RETURNING
        );
        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(&article.title)
            .bind(&article.topic)
            .bind(&article.author)
            .bind(&article.body)
            .bind(&article.article_img_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn increment_article_votes(
        &self,
        article_id: i32,
        inc: i32,
    ) -> Result<Option<Article>, AppError> {
        let sql = format!(
            "UPDATE articles SET votes = votes + $1 WHERE article_id = $2 RETURNING {}",
            ARTICLE_RETURNING
        );
        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(inc)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT article_id FROM articles WHERE article_id = $1 FOR UPDATE")
                .bind(article_id)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Ok(false);
        }
        let comments = sqlx::query("DELETE FROM comments WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(
            article_id,
            comments = comments.rows_affected(),
            "deleted article"
        );
        Ok(true)
    }

    async fn comments_for_article(
        &self,
        article_id: i32,
        page: Option<Page>,
    ) -> Result<Vec<Comment>, AppError> {
        self.fetch_all(&select_comments_for_article(article_id, page))
            .await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let sql = format!(
            "INSERT INTO comments (body, author, article_id) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(&comment.body)
            .bind(&comment.username)
            .bind(comment.article_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn comment_by_id(&self, comment_id: i32) -> Result<Option<Comment>, AppError> {
        let sql = format!("SELECT {} FROM comments WHERE comment_id = $1", COMMENT_COLUMNS);
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn increment_comment_votes(
        &self,
        comment_id: i32,
        inc: i32,
    ) -> Result<Option<Comment>, AppError> {
        let sql = format!(
            "UPDATE comments SET votes = votes + $1 WHERE comment_id = $2 RETURNING {}",
            COMMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(inc)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>("SELECT username, name, avatar_url FROM users ORDER BY username")
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
