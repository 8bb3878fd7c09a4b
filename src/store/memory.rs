//! In-memory store with the same referential rules, ordering and paging as the
//! PostgreSQL one. Backs the HTTP tests and local runs without a database.

use crate::error::AppError;
use crate::models::{
    Article, ArticleDetail, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User,
};
use crate::service::{ArticleQuery, Page, SortColumn, SortOrder};
use crate::store::NewsStore;
use async_trait::async_trait;
use std::cmp::Ordering;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    next_article_id: i32,
    next_comment_id: i32,
}

impl Tables {
    fn comment_count(&self, article_id: i32) -> i64 {
        self.comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .count() as i64
    }

    fn has_user(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Start from existing rows. New ids continue after the highest given id.
    pub fn with_rows(
        topics: Vec<Topic>,
        users: Vec<User>,
        articles: Vec<Article>,
        comments: Vec<Comment>,
    ) -> Self {
        let next_article_id = articles.iter().map(|a| a.article_id).max().unwrap_or(0) + 1;
        let next_comment_id = comments.iter().map(|c| c.comment_id).max().unwrap_or(0) + 1;
        MemoryStore {
            tables: RwLock::new(Tables {
                topics,
                users,
                articles,
                comments,
                next_article_id,
                next_comment_id,
            }),
        }
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn compare_by(column: SortColumn, a: &ArticleSummary, b: &ArticleSummary) -> Ordering {
    match column {
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Topic => a.topic.cmp(&b.topic),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::Votes => a.votes.cmp(&b.votes),
        SortColumn::ArticleId => a.article_id.cmp(&b.article_id),
    }
}

fn apply_page<T>(rows: Vec<T>, page: Option<Page>) -> Vec<T> {
    match page {
        None => rows,
        Some(page) => {
            let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
            rows.into_iter().skip(offset).take(limit).collect()
        }
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        let mut topics = self.tables.read().await.topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, AppError> {
        let t = self.tables.read().await;
        Ok(t.topics.iter().any(|x| x.slug.eq_ignore_ascii_case(slug)))
    }

    async fn insert_topic(&self, topic: &NewTopic) -> Result<Topic, AppError> {
        let mut t = self.tables.write().await;
        if t.topics.iter().any(|x| x.slug == topic.slug) {
            return Err(AppError::BadRequest);
        }
        let row = Topic {
            slug: topic.slug.clone(),
            description: topic.description.clone(),
        };
        t.topics.push(row.clone());
        Ok(row)
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, AppError> {
        let t = self.tables.read().await;
        let mut rows: Vec<ArticleSummary> = t
            .articles
            .iter()
            .filter(|a| {
                query
                    .topic
                    .as_deref()
                    .map(|topic| a.topic.eq_ignore_ascii_case(topic))
                    .unwrap_or(true)
            })
            .map(|a| ArticleSummary::from_article(a, t.comment_count(a.article_id)))
            .collect();
        rows.sort_by(|a, b| {
            let ord = compare_by(query.sort_by, a, b).then(a.article_id.cmp(&b.article_id));
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(apply_page(rows, query.page))
    }

    async fn article_by_id(&self, article_id: i32) -> Result<Option<ArticleDetail>, AppError> {
        let t = self.tables.read().await;
        Ok(t.articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|a| ArticleDetail {
                article: a.clone(),
                comment_count: t.comment_count(article_id),
            }))
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<Article, AppError> {
        let mut t = self.tables.write().await;
        if !t.topics.iter().any(|x| x.slug == article.topic) || !t.has_user(&article.author) {
            return Err(AppError::BadRequest);
        }
        let row = Article {
            article_id: t.next_article_id,
            title: article.title.clone(),
            topic: article.topic.clone(),
            author: article.author.clone(),
            body: article.body.clone(),
            created_at: now(),
            votes: 0,
            article_img_url: Some(article.article_img_url.clone()),
        };
        t.next_article_id += 1;
        t.articles.push(row.clone());
        Ok(row)
    }

    async fn increment_article_votes(
        &self,
        article_id: i32,
        inc: i32,
    ) -> Result<Option<Article>, AppError> {
        let mut t = self.tables.write().await;
        let Some(a) = t.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(None);
        };
        a.votes = a.votes.checked_add(inc).ok_or(AppError::BadRequest)?;
        Ok(Some(a.clone()))
    }

    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if !t.articles.iter().any(|a| a.article_id == article_id) {
            return Ok(false);
        }
        t.comments.retain(|c| c.article_id != article_id);
        t.articles.retain(|a| a.article_id != article_id);
        Ok(true)
    }

    async fn comments_for_article(
        &self,
        article_id: i32,
        page: Option<Page>,
    ) -> Result<Vec<Comment>, AppError> {
        let t = self.tables.read().await;
        let mut rows: Vec<Comment> = t
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.comment_id.cmp(&a.comment_id))
        });
        Ok(apply_page(rows, page))
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let mut t = self.tables.write().await;
        if !t.articles.iter().any(|a| a.article_id == comment.article_id)
            || !t.has_user(&comment.username)
        {
            return Err(AppError::BadRequest);
        }
        let row = Comment {
            comment_id: t.next_comment_id,
            body: comment.body.clone(),
            article_id: comment.article_id,
            author: comment.username.clone(),
            votes: 0,
            created_at: now(),
        };
        t.next_comment_id += 1;
        t.comments.push(row.clone());
        Ok(row)
    }

    async fn comment_by_id(&self, comment_id: i32) -> Result<Option<Comment>, AppError> {
        let t = self.tables.read().await;
        Ok(t.comments
            .iter()
            .find(|c| c.comment_id == comment_id)
            .cloned())
    }

    async fn increment_comment_votes(
        &self,
        comment_id: i32,
        inc: i32,
    ) -> Result<Option<Comment>, AppError> {
        let mut t = self.tables.write().await;
        let Some(c) = t.comments.iter_mut().find(|c| c.comment_id == comment_id) else {
            return Ok(None);
        };
        c.votes = c.votes.checked_add(inc).ok_or(AppError::BadRequest)?;
        Ok(Some(c.clone()))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        let before = t.comments.len();
        t.comments.retain(|c| c.comment_id != comment_id);
        Ok(t.comments.len() < before)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.tables.read().await.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.read().await;
        Ok(t.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn article(id: i32, topic: &str, day: u32) -> Article {
        Article {
            article_id: id,
            title: format!("title {id}"),
            topic: topic.into(),
            author: "rogersop".into(),
            body: "body".into(),
            created_at: at(day),
            votes: 0,
            article_img_url: None,
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::with_rows(
            vec![
                Topic {
                    slug: "cats".into(),
                    description: "meow".into(),
                },
                Topic {
                    slug: "paper".into(),
                    description: "what books are made of".into(),
                },
            ],
            vec![User {
                username: "rogersop".into(),
                name: "paul".into(),
                avatar_url: None,
            }],
            vec![article(1, "cats", 3), article(2, "cats", 1), article(3, "cats", 2)],
            vec![Comment {
                comment_id: 1,
                body: "nice".into(),
                article_id: 2,
                author: "rogersop".into(),
                votes: 0,
                created_at: at(4),
            }],
        )
    }

    #[tokio::test]
    async fn new_ids_continue_after_seeded_rows() {
        let s = store();
        let a = s
            .insert_article(&NewArticle {
                title: "t".into(),
                topic: "paper".into(),
                author: "rogersop".into(),
                body: "b".into(),
                article_img_url: "u".into(),
            })
            .await
            .unwrap();
        assert_eq!(a.article_id, 4);
        let c = s
            .insert_comment(&NewComment {
                article_id: 4,
                username: "rogersop".into(),
                body: "first".into(),
            })
            .await
            .unwrap();
        assert_eq!(c.comment_id, 2);
        assert_eq!(c.votes, 0);
    }

    #[tokio::test]
    async fn dangling_references_are_rejected() {
        let s = store();
        let err = s
            .insert_article(&NewArticle {
                title: "t".into(),
                topic: "dogs".into(),
                author: "rogersop".into(),
                body: "b".into(),
                article_img_url: "u".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest));
        let err = s
            .insert_comment(&NewComment {
                article_id: 1,
                username: "nobody".into(),
                body: "b".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest));
        let err = s
            .insert_topic(&NewTopic {
                slug: "cats".into(),
                description: "again".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest));
    }

    #[tokio::test]
    async fn listing_sorts_and_pages() {
        let s = store();
        let rows = s.list_articles(&ArticleQuery::default()).await.unwrap();
        let ids: Vec<i32> = rows.iter().map(|a| a.article_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(rows[2].comment_count, 1);

        let rows = s
            .list_articles(&ArticleQuery {
                sort_by: SortColumn::ArticleId,
                order: SortOrder::Asc,
                topic: Some("CATS".into()),
                page: Some(Page { limit: 1, offset: 1 }),
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].article_id, 2);
    }

    #[tokio::test]
    async fn topics_and_users_list_in_key_order() {
        let s = store();
        s.insert_topic(&NewTopic {
            slug: "aardvarks".into(),
            description: "first".into(),
        })
        .await
        .unwrap();
        let slugs: Vec<String> = s
            .list_topics()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.slug)
            .collect();
        assert_eq!(slugs, vec!["aardvarks", "cats", "paper"]);

        let s = MemoryStore::with_rows(
            Vec::new(),
            ["rogersop", "butter_bridge", "lurker"]
                .into_iter()
                .map(|name| User {
                    username: name.into(),
                    name: name.into(),
                    avatar_url: None,
                })
                .collect(),
            Vec::new(),
            Vec::new(),
        );
        let names: Vec<String> = s
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["butter_bridge", "lurker", "rogersop"]);
    }

    #[tokio::test]
    async fn deleting_an_article_removes_its_comments() {
        let s = store();
        assert!(s.delete_article(2).await.unwrap());
        assert!(s.comment_by_id(1).await.unwrap().is_none());
        assert!(!s.delete_article(2).await.unwrap());
    }
}
