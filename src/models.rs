//! Row types returned by the store and the inputs accepted for inserts.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// Placeholder image used when an article is created without one.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

/// Timestamps are stored as UTC wall clock and rendered with millisecond precision.
pub fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// `COUNT(...)` is a bigint aggregate; it is exposed to clients as a decimal string.
pub fn serialize_count<S: Serializer>(count: &i64, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(count)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub article_img_url: Option<String>,
}

/// One entry of the article listing: no body, plus the comment count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub article_img_url: Option<String>,
    #[serde(serialize_with = "serialize_count")]
    pub comment_count: i64,
}

impl ArticleSummary {
    pub fn from_article(article: &Article, comment_count: i64) -> Self {
        ArticleSummary {
            article_id: article.article_id,
            title: article.title.clone(),
            topic: article.topic.clone(),
            author: article.author.clone(),
            created_at: article.created_at,
            votes: article.votes,
            article_img_url: article.article_img_url.clone(),
            comment_count,
        }
    }
}

/// A full article with its comment count, as returned by `GET /api/articles/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct ArticleDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    #[serde(serialize_with = "serialize_count")]
    pub comment_count: i64,
}

/// A freshly inserted article. It cannot have comments yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub comment_count: i64,
}

impl From<Article> for CreatedArticle {
    fn from(article: Article) -> Self {
        CreatedArticle {
            article,
            comment_count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
}

/// Validated input for a new topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTopic {
    pub slug: String,
    pub description: String,
}

/// Validated input for a new article; the image URL is already defaulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub article_img_url: String,
}

/// Validated input for a new comment on an article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: i32,
    pub username: String,
    pub body: String,
}
