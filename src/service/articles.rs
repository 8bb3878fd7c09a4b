//! Article listing, fetch, create, vote update and delete.

use crate::error::{AppError, Resource};
use crate::extractors::JsonBody;
use crate::models::{Article, ArticleDetail, ArticleSummary, CreatedArticle, NewArticle, DEFAULT_ARTICLE_IMG_URL};
use crate::service::existence::ensure_topic_exists;
use crate::service::validation::{
    optional_str, parse_id, parse_inc_votes, required_str, ArticleListParams, ArticleQuery,
};
use crate::store::NewsStore;

pub struct ArticleService;

impl ArticleService {
    /// All parameters are validated before the store is touched. With a topic
    /// filter, the listing and the topic existence check run concurrently and
    /// both must succeed.
    pub async fn list(
        store: &dyn NewsStore,
        params: &ArticleListParams,
    ) -> Result<Vec<ArticleSummary>, AppError> {
        let query = ArticleQuery::from_params(params)?;
        match query.topic.as_deref() {
            None => store.list_articles(&query).await,
            Some(topic) => {
                let (articles, ()) = tokio::try_join!(
                    store.list_articles(&query),
                    ensure_topic_exists(store, topic)
                )?;
                Ok(articles)
            }
        }
    }

    pub async fn get(store: &dyn NewsStore, id: &str) -> Result<ArticleDetail, AppError> {
        let article_id = parse_id(id)?;
        store
            .article_by_id(article_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Article))
    }

    /// Adds `inc_votes` to the article. The article must exist before the body is looked at.
    pub async fn update_votes(
        store: &dyn NewsStore,
        id: &str,
        body: JsonBody,
    ) -> Result<Article, AppError> {
        let current = Self::get(store, id).await?;
        let body = body.into_object()?;
        let inc = parse_inc_votes(&body)?;
        if inc == 0 {
            return Ok(current.article);
        }
        store
            .increment_article_votes(current.article.article_id, inc)
            .await?
            .ok_or(AppError::NotFound(Resource::Article))
    }

    /// Unknown body fields are ignored; a missing image URL gets the placeholder.
    pub async fn create(
        store: &dyn NewsStore,
        body: JsonBody,
    ) -> Result<CreatedArticle, AppError> {
        let body = body.into_object()?;
        let new = NewArticle {
            title: required_str(&body, "title")?,
            topic: required_str(&body, "topic")?,
            author: required_str(&body, "author")?,
            body: required_str(&body, "body")?,
            article_img_url: optional_str(&body, "article_img_url")?
                .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_string()),
        };
        let article = store.insert_article(&new).await?;
        tracing::info!(article_id = article.article_id, topic = %article.topic, "created article");
        Ok(CreatedArticle::from(article))
    }

    pub async fn delete(store: &dyn NewsStore, id: &str) -> Result<(), AppError> {
        let article_id = parse_id(id)?;
        if store.delete_article(article_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(Resource::Article))
        }
    }
}
